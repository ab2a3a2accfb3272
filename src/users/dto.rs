use serde::Deserialize;

/// Body of the create and edit forms. Missing fields arrive as empty strings
/// so the store reports them as validation errors.
#[derive(Debug, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}
