//! Procedural macros for the docform project.
//!
//! Provides `#[derive(Document)]`, which implements `docform::document::Document` from
//! `#[field(...)]` attributes on the struct's fields.
//!
//! ```ignore
//! #[derive(Serialize, Document)]
//! #[document(type_map = person_type_map)]
//! pub struct Person {
//!     #[field(string, required)]
//!     pub firstname: String,
//!     #[field(email, name = "mail")]
//!     #[serde(rename = "mail")]
//!     pub email: String,
//!     #[field(list, nested)]
//!     pub addresses: Vec<Address>,
//!     #[field(custom = "money")]
//!     pub salary: i64,
//!     // Not declared: left out of dicts, JSON and schemas.
//!     pub cache_key: String,
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docform_macros;

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, Field, Fields, GenericArgument, Ident, LitStr, Path,
    PathArguments, Token, Type, ext::IdentExt, meta::ParseNestedMeta, parse_macro_input,
};

const KINDS: [(&str, &str); 22] = [
    ("string", "String"),
    ("url", "Url"),
    ("email", "Email"),
    ("int", "Int"),
    ("float", "Float"),
    ("decimal", "Decimal"),
    ("datetime", "DateTime"),
    ("complex_datetime", "ComplexDateTime"),
    ("list", "List"),
    ("sorted_list", "SortedList"),
    ("dict", "Dict"),
    ("map", "Map"),
    ("object_id", "ObjectId"),
    ("reference", "Reference"),
    ("generic_reference", "GenericReference"),
    ("embedded_document", "EmbeddedDocument"),
    ("generic_embedded_document", "GenericEmbeddedDocument"),
    ("boolean", "Boolean"),
    ("file", "File"),
    ("binary", "Binary"),
    ("geo_point", "GeoPoint"),
    ("sequence", "Sequence"),
];

/// Derives `docform::document::Document`.
///
/// Only fields carrying a `#[field(...)]` attribute are declared, in struct order. Declared
/// names follow serde's `rename` and `rename_all`, so they match the serialized keys.
#[proc_macro_derive(Document, attributes(document, field))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

enum Kind {
    Standard(Ident),
    Custom(LitStr),
}

struct FieldSpec {
    name: String,
    kind: Kind,
    required: bool,
    nested: Option<Type>,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Document can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Document can only be derived for structs",
            ));
        }
    };

    let rename_all = container_rename_all(&input.attrs)?;

    let mut decls = Vec::new();
    for field in fields {
        if let Some(spec) = parse_field(field, rename_all)? {
            decls.push(field_decl(&spec));
        }
    }

    let type_map = parse_type_map(&input)?.map(|path| {
        quote! {
            fn type_map() -> &'static ::docform::typemap::TypeMap {
                #path()
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::docform::document::Document for #ident #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::docform::field::FieldDecl> {
                ::std::vec![#(#decls),*]
            }

            #type_map
        }
    })
}

fn parse_type_map(input: &DeriveInput) -> syn::Result<Option<Path>> {
    let mut type_map = None;

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("document")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_map") {
                type_map = Some(meta.value()?.parse::<Path>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported document attribute"))
            }
        })?;
    }

    Ok(type_map)
}

/// Case conventions accepted by serde's `rename_all`.
#[derive(Clone, Copy)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        Ok(match lit.value().as_str() {
            "lowercase" => RenameRule::Lower,
            "UPPERCASE" => RenameRule::Upper,
            "PascalCase" => RenameRule::Pascal,
            "camelCase" => RenameRule::Camel,
            "snake_case" => RenameRule::Snake,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "kebab-case" => RenameRule::Kebab,
            "SCREAMING-KEBAB-CASE" => RenameRule::ScreamingKebab,
            _ => return Err(syn::Error::new_spanned(lit, "unknown rename_all rule")),
        })
    }

    fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower => field.to_lowercase(),
            RenameRule::Upper => field.to_uppercase(),
            RenameRule::Pascal => field.to_upper_camel_case(),
            RenameRule::Camel => field.to_lower_camel_case(),
            RenameRule::Snake => field.to_snake_case(),
            RenameRule::ScreamingSnake => field.to_shouty_snake_case(),
            RenameRule::Kebab => field.to_kebab_case(),
            RenameRule::ScreamingKebab => field.to_shouty_kebab_case(),
        }
    }
}

/// Reads a serde name option: `rename = "x"` or `rename(serialize = "x", ...)`.
///
/// Only the serialize side matters, since values are read from the serialized form.
fn serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse::<LitStr>()?));
    }

    let mut name = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            name = Some(inner.value()?.parse::<LitStr>()?);
        } else {
            skip_meta(&inner)?;
        }
        Ok(())
    })?;
    Ok(name)
}

/// Consumes a serde option this macro does not care about.
fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta(&inner))?;
    }
    Ok(())
}

fn container_rename_all(attrs: &[Attribute]) -> syn::Result<Option<RenameRule>> {
    let mut rule = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(lit) = serialize_name(&meta)? {
                    rule = Some(RenameRule::from_lit(&lit)?);
                }
            } else {
                skip_meta(&meta)?;
            }
            Ok(())
        })?;
    }

    Ok(rule)
}

fn field_rename(field: &Field) -> syn::Result<Option<LitStr>> {
    let mut rename = None;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(lit) = serialize_name(&meta)? {
                    rename = Some(lit);
                }
            } else {
                skip_meta(&meta)?;
            }
            Ok(())
        })?;
    }

    Ok(rename)
}

fn parse_field(field: &Field, rename_all: Option<RenameRule>) -> syn::Result<Option<FieldSpec>> {
    let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("field")) else {
        return Ok(None);
    };

    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;

    let serde_rename = field_rename(field)?;
    let name = match (&serde_rename, rename_all) {
        (Some(rename), _) => rename.value(),
        (None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
        (None, None) => ident.unraw().to_string(),
    };
    let mut explicit_name = None;
    let mut kind = None;
    let mut required = false;
    let mut nested = false;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("required") {
            required = true;
        } else if meta.path.is_ident("nested") {
            nested = true;
        } else if meta.path.is_ident("name") {
            explicit_name = Some(meta.value()?.parse::<LitStr>()?);
        } else if meta.path.is_ident("custom") {
            kind = Some(Kind::Custom(meta.value()?.parse::<LitStr>()?));
        } else if let Some(variant) = standard_kind(&meta.path) {
            if kind.is_some() {
                return Err(meta.error("field kind given more than once"));
            }
            kind = Some(Kind::Standard(variant));
        } else {
            return Err(meta.error("unknown field kind or option"));
        }
        Ok(())
    })?;

    let kind = kind.ok_or_else(|| syn::Error::new_spanned(attr, "missing field kind"))?;

    if let Some(explicit) = explicit_name
        && explicit.value() != name
    {
        return Err(syn::Error::new_spanned(
            explicit,
            format!("field name does not match the serialized name `{name}`"),
        ));
    }

    let nested = if nested {
        let is_list = matches!(&kind, Kind::Standard(variant) if variant == "List" || variant == "SortedList");
        if !is_list {
            return Err(syn::Error::new_spanned(attr, "`nested` is only valid on list fields"));
        }
        Some(element_type(&field.ty)?)
    } else {
        None
    };

    Ok(Some(FieldSpec {
        name,
        kind,
        required,
        nested,
    }))
}

fn standard_kind(path: &Path) -> Option<Ident> {
    KINDS
        .iter()
        .find(|(attr, _)| path.is_ident(attr))
        .map(|(_, variant)| Ident::new(variant, Span::call_site()))
}

/// `Foo<T>` -> `T` when the last path segment is `Foo`.
fn generic_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == wrapper
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}

/// `Vec<T>` or `Option<Vec<T>>` -> `T`
fn element_type(ty: &Type) -> syn::Result<Type> {
    let list = generic_argument(ty, "Option").unwrap_or(ty);

    generic_argument(list, "Vec").cloned().ok_or_else(|| {
        syn::Error::new_spanned(ty, "`nested` list fields must have type `Vec<T>` or `Option<Vec<T>>`")
    })
}

fn field_decl(spec: &FieldSpec) -> TokenStream2 {
    let name = &spec.name;
    let kind = match &spec.kind {
        Kind::Standard(variant) => quote!(::docform::field::FieldKind::#variant),
        Kind::Custom(custom) => quote!(::docform::field::FieldKind::Custom(#custom)),
    };

    let mut decl = quote!(::docform::field::FieldDecl::new(#name, #kind));
    if spec.required {
        decl = quote!(#decl.required());
    }
    if let Some(element) = &spec.nested {
        decl = quote!(#decl.with_items::<#element>());
    }
    decl
}
