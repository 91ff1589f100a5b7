#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every `LanguageGems` crate.
//!
//! * [`gems_error`] turns an enum into a `thiserror` error with context support.
//! * [`api_model`] applies the workspace serde/OpenAPI policy to wire types.
//! * [`api_handler`] documents an Axum handler through `utoipa`.
//! * [`gems_slice`] turns a struct into a shareable feature slice.
//!
//! Examples are `ignore`d because they need the consuming crates in scope.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, Item, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro for API data models (requests, responses, stored records).
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` unless already present.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate enables its `server` feature.
/// * **Serde Policy** for structs: `rename_all = "camelCase"` and `deny_unknown_fields`.
/// * **Serde Policy** for enums: `rename_all = "camelCase"` only; unknown fields are not
///   meaningful for variant tags.
///
/// # Arguments
///
/// * `rename_all = "kebab-case"` - Overrides the default rename policy.
/// * `deny_unknown_fields = false` - Disables strict field checking on structs.
///
/// # Example
///
/// ```rust,ignore
/// use gems_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct GuessRequest {
///     pub letter: char,
/// }
///
/// #[api_model(rename_all = "kebab-case")]
/// #[derive(Clone, Copy)]
/// pub enum Tier {
///     Foundation,
///     Higher,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as Item);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to document an Axum handler with `utoipa::path`.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `post`, `path = "..."`,
/// `responses(...)`, `tag = "..."`). The path attribute is only emitted when the
/// consuming crate's `server` feature is on.
///
/// ```rust,ignore
/// #[api_handler(
///     post,
///     path = "/games/hangman",
///     responses((status = OK, body = HangmanView)),
///     tag = GAMES_TAG
/// )]
/// pub async fn new_hangman(/* extractors */) -> ApiResult<Json<HangmanView>> { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for domain error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant holding a source.
/// * `From<SourceError>` for variants with a `source` (or `#[source]`/`#[from]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * `ErrorName::kind()` returning the `snake_case` variant name, used as a stable
///   machine-readable error code on the wire.
///
/// # Requirements
///
/// Variants use named fields. Variants with a source also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[gems_derive::gems_error]
/// pub enum GameError {
///     #[error("Game not found{}: {message}", format_context(.context))]
///     NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Internal game error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// assert_eq!(GameError::from("boom").kind(), "internal");
/// ```
#[proc_macro_attribute]
pub fn gems_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `gems_kernel::domain::registry::FeatureSlice`.
///
/// ```rust,ignore
/// #[gems_derive::gems_slice]
/// pub struct Games {
///     pub hangman: GameStore<Hangman>,
/// }
///
/// let games = Games::new(GamesInner { hangman: GameStore::new(1_000, idle) });
/// ```
#[proc_macro_attribute]
pub fn gems_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
