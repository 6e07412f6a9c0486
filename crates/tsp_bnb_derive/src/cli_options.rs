use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Path, parse_macro_input, spanned::Spanned};

use crate::utils;

/// One `--long` option collected from a field's `#[cli(...)]` attribute.
struct CliField {
    long: String,
    value_hint: String,
    flag: bool,
    parse_with: Option<Path>,
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::new();
    let mut usage_lines = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let mut cli: Option<CliField> = None;
        for attr in &field.attrs {
            if !attr.path().is_ident("cli") {
                continue;
            }
            let entry = cli.get_or_insert_with(|| CliField {
                long: utils::to_kebab_case(&field_ident.to_string()),
                value_hint: String::from("<value>"),
                flag: false,
                parse_with: None,
            });
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    entry.long = lit.value();
                    return Ok(());
                }
                if meta.path.is_ident("value") {
                    let lit: LitStr = meta.value()?.parse()?;
                    entry.value_hint = lit.value();
                    return Ok(());
                }
                if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    entry.parse_with = Some(syn::parse_str(&lit.value())?);
                    return Ok(());
                }
                if meta.path.is_ident("flag") {
                    entry.flag = true;
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected long/value/parse_with/flag"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        let Some(cli) = cli else {
            continue;
        };

        let long_lit = LitStr::new(&cli.long, Span::call_site());

        if cli.flag {
            if !utils::is_bool(&field.ty) {
                return syn::Error::new(field.ty.span(), "#[cli(flag)] requires a bool field")
                    .to_compile_error()
                    .into();
            }
            let negated_lit = LitStr::new(&format!("no-{}", cli.long), Span::call_site());
            arms.push(quote! {
                #long_lit => {
                    self.#field_ident = match inline {
                        Some(raw) => Self::parse_cli_bool(name, &raw)?,
                        None => true,
                    };
                    Ok(true)
                }
                #negated_lit => {
                    if inline.is_some() {
                        return Err(crate::Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    self.#field_ident = false;
                    Ok(true)
                }
            });
            usage_lines.push(format!("  --{}[=<bool>]", cli.long));
            usage_lines.push(format!("  --no-{}", cli.long));
            continue;
        }

        let assign = match utils::inner_of_option(&field.ty) {
            Some(inner) => {
                let parse_expr = utils::build_cli_parse_expr(inner, cli.parse_with.as_ref());
                quote! { self.#field_ident = Some(#parse_expr); }
            }
            None => {
                let parse_expr = utils::build_cli_parse_expr(&field.ty, cli.parse_with.as_ref());
                quote! { self.#field_ident = #parse_expr; }
            }
        };

        arms.push(quote! {
            #long_lit => {
                let raw = match inline {
                    Some(raw) => raw,
                    None => args
                        .next_if(|next| !next.starts_with("--"))
                        .ok_or_else(|| {
                            crate::Error::invalid_input(format!("Missing value for --{name}"))
                        })?,
                };
                #assign
                Ok(true)
            }
        });
        usage_lines.push(format!("  --{} {}", cli.long, cli.value_hint));
    }

    let usage_lit = LitStr::new(&format!("{}\n", usage_lines.join("\n")), Span::call_site());

    let expanded = quote! {
        impl #struct_ident {
            /// Splits `name=value` into its parts; a bare `name` carries no inline value.
            fn split_arg(raw_name: &str) -> (String, Option<String>) {
                match raw_name.split_once('=') {
                    Some((k, v)) => (k.to_string(), Some(v.to_string())),
                    None => (raw_name.to_string(), None),
                }
            }

            fn parse_cli_bool(name: &str, raw: &str) -> crate::Result<bool> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Ok(true),
                    "0" | "false" | "no" | "off" => Ok(false),
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid boolean for --{name}: {raw} (expected true/false)"
                    ))),
                }
            }

            /// Applies one option. Returns `Ok(false)` when `name` is not a known option.
            fn apply_cli_option(
                &mut self,
                name: &str,
                inline: Option<String>,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms)*
                    _ => Ok(false),
                }
            }

            /// One line per option, in declaration order.
            pub fn options_usage() -> &'static str {
                #usage_lit
            }
        }
    };

    TokenStream::from(expanded)
}
