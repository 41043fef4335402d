mod read_model;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(ReadModel)] derive macro
// ============================================================================

/// Derive macro for the `ReadModel` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, ReadModel)]
/// #[readmodel(collection = "saves")]
/// struct SaveRecord {
///     #[readmodel(id)]
///     pub key: String,
///     pub user_id: String,
///     pub question_id: String,
/// }
/// ```
///
/// - `#[readmodel(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[readmodel(id)]` marks the field used as the unique identifier.
///   If omitted, defaults to a field named `id`.
/// - `#[readmodel(crate = "path")]` overrides the path to the `devflow` crate,
///   which is needed when deriving inside `devflow` itself.
#[proc_macro_derive(ReadModel, attributes(readmodel))]
pub fn derive_read_model(input: TokenStream) -> TokenStream {
    read_model::derive_read_model(input)
}
