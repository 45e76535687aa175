//! Domain models.

pub mod entry;
pub mod export;
pub mod field;
pub mod form;

pub use entry::{Entry, EntryData, EntryResponse, EntryValue, SubmitEntryRequest, SubmitEntryResponse};
pub use export::{ExportDocument, ImportDocument, ImportForm, ImportSummary, EXPORT_FORMAT_VERSION};
pub use field::{FieldDef, FieldPatch, FieldStyles, FieldType, FieldValidation};
pub use form::{
    AckResponse, CreateFormRequest, CreatedFormResponse, Form, FormResponse, FormSettings,
    FormSummary, ReorderFieldsRequest, SettingsPatch, StoredField, UpdateFormRequest,
};
