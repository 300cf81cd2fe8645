//! Parsing utilities for the remote_service macro.

use proc_macro2::{Span, TokenStream};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Error, Expr, ExprLit, FnArg, Ident, ItemTrait, Lit, MetaNameValue, Pat, PatType,
    Result, ReturnType, Token, TraitItem, TraitItemFn, Type,
};

/// Bus selector named in the attribute arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusChoice {
    System,
    Session,
    Custom,
}

/// Arguments passed to the #[remote_service] attribute.
#[derive(Debug)]
pub struct ServiceArgs {
    /// Logical bus name the service registers under.
    pub service_name: String,
    /// Object path the export adapter registers at.
    pub object_path: String,
    /// Interface name used for calls and signals.
    pub interface_name: String,
    /// Which bus the descriptor selects.
    pub bus: BusChoice,
}

impl ServiceArgs {
    pub fn parse(attr: TokenStream) -> Result<Self> {
        let metas = Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse2(attr)?;

        let mut service_name = None;
        let mut object_path = None;
        let mut interface_name = None;
        let mut bus = BusChoice::Session;

        for meta in metas {
            let value = match &meta.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.value(),
                other => return Err(Error::new_spanned(other, "expected a string literal")),
            };

            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();
            match key.as_str() {
                "name" => service_name = Some(value),
                "path" => object_path = Some(value),
                "interface" => interface_name = Some(value),
                "bus" => {
                    bus = match value.as_str() {
                        "system" => BusChoice::System,
                        "session" => BusChoice::Session,
                        "custom" => BusChoice::Custom,
                        _ => {
                            return Err(Error::new_spanned(
                                &meta.value,
                                "bus must be \"system\", \"session\", or \"custom\"",
                            ));
                        }
                    }
                }
                _ => {
                    return Err(Error::new_spanned(
                        &meta.path,
                        "unknown argument; expected name, path, interface, or bus",
                    ));
                }
            }
        }

        let missing = |what| Error::new(Span::call_site(), format!("missing `{what} = \"...\"`"));
        Ok(Self {
            service_name: service_name.ok_or_else(|| missing("name"))?,
            object_path: object_path.ok_or_else(|| missing("path"))?,
            interface_name: interface_name.ok_or_else(|| missing("interface"))?,
            bus,
        })
    }
}

/// Parsed service definition.
#[derive(Debug)]
pub struct ServiceDefinition {
    /// Visibility of the trait; shared by every generated item.
    pub vis: syn::Visibility,
    /// Name of the service trait.
    pub name: Ident,
    /// Trait-level attributes (doc comments mostly).
    pub attrs: Vec<Attribute>,
    /// Two-way methods, in declaration order.
    pub methods: Vec<MethodDefinition>,
    /// One-way notifications, in declaration order.
    pub notifications: Vec<NotificationDefinition>,
}

/// Parsed method definition.
#[derive(Debug)]
pub struct MethodDefinition {
    /// Method name; identical on the wire.
    pub name: Ident,
    /// Arguments excluding self, in declaration order.
    pub args: Vec<MethodArg>,
    /// Return type info.
    pub return_type: ReturnTypeInfo,
    /// Original method attributes.
    pub attrs: Vec<Attribute>,
}

/// Parsed notification definition.
#[derive(Debug)]
pub struct NotificationDefinition {
    /// Notification name; identical on the wire.
    pub name: Ident,
    /// Payload, in declaration order.
    pub args: Vec<MethodArg>,
    /// Original attributes with the `#[notification]` marker removed.
    pub attrs: Vec<Attribute>,
}

/// One argument of a method or notification.
#[derive(Debug)]
pub struct MethodArg {
    /// Argument name.
    pub name: Ident,
    /// Argument type.
    pub ty: Type,
}

/// Information about a method's return type.
#[derive(Debug)]
pub struct ReturnTypeInfo {
    /// The success type (T in Result<T, E>).
    pub ok_type: Type,
    /// The full declared return type.
    pub full_type: Type,
    /// True if the success type is `()`; such methods cross the bus as the
    /// void sentinel.
    pub is_void: bool,
}

impl ServiceDefinition {
    /// Parse a trait into a service definition.
    pub fn parse(item: ItemTrait) -> Result<Self> {
        let mut methods = Vec::new();
        let mut notifications = Vec::new();

        for trait_item in &item.items {
            if let TraitItem::Fn(func) = trait_item {
                if has_notification_marker(&func.attrs) {
                    notifications.push(NotificationDefinition::parse(func)?);
                } else {
                    methods.push(MethodDefinition::parse(func)?);
                }
            }
        }

        if methods.is_empty() && notifications.is_empty() {
            return Err(Error::new_spanned(
                &item,
                "service trait must declare at least one method or notification",
            ));
        }

        Ok(Self {
            vis: item.vis.clone(),
            name: item.ident.clone(),
            attrs: item.attrs.clone(),
            methods,
            notifications,
        })
    }
}

fn has_notification_marker(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident("notification"))
}

fn require_shared_receiver(func: &TraitItemFn) -> Result<()> {
    match func.sig.inputs.first() {
        Some(FnArg::Receiver(recv)) if recv.reference.is_some() && recv.mutability.is_none() => {
            Ok(())
        }
        _ => Err(Error::new_spanned(
            &func.sig,
            "remote service items must take &self",
        )),
    }
}

fn parse_args(func: &TraitItemFn) -> Result<Vec<MethodArg>> {
    let mut args = Vec::new();

    for input in func.sig.inputs.iter().skip(1) {
        // Skip self
        if let FnArg::Typed(PatType { pat, ty, .. }) = input {
            let name = match pat.as_ref() {
                Pat::Ident(ident) => ident.ident.clone(),
                _ => {
                    return Err(Error::new_spanned(
                        pat,
                        "expected identifier pattern for argument",
                    ));
                }
            };

            args.push(MethodArg {
                name,
                ty: ty.as_ref().clone(),
            });
        }
    }

    Ok(args)
}

impl MethodDefinition {
    /// Parse a trait method into a method definition.
    pub fn parse(func: &TraitItemFn) -> Result<Self> {
        let sig = &func.sig;

        if sig.asyncness.is_none() {
            return Err(Error::new_spanned(sig, "remote methods must be async"));
        }
        require_shared_receiver(func)?;

        let args = parse_args(func)?;
        let return_type = Self::parse_return_type(&sig.output)?;

        Ok(Self {
            name: sig.ident.clone(),
            args,
            return_type,
            attrs: func.attrs.clone(),
        })
    }

    fn parse_return_type(output: &ReturnType) -> Result<ReturnTypeInfo> {
        let ty = match output {
            ReturnType::Default => {
                return Err(Error::new_spanned(
                    output,
                    "remote methods must return Result<T, wirebus::CallError>",
                ));
            }
            ReturnType::Type(_, ty) => ty.as_ref().clone(),
        };

        // Extract Result<T, E> and insist E is the framework call error.
        if let Type::Path(type_path) = &ty {
            if let Some(segment) = type_path.path.segments.last() {
                if segment.ident == "Result" {
                    if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                        let mut types = args.args.iter().filter_map(|arg| {
                            if let syn::GenericArgument::Type(t) = arg {
                                Some(t.clone())
                            } else {
                                None
                            }
                        });

                        if let (Some(ok_type), Some(err_type)) = (types.next(), types.next()) {
                            if !is_call_error(&err_type) {
                                return Err(Error::new_spanned(
                                    &err_type,
                                    "remote methods must use wirebus::CallError as the error type",
                                ));
                            }
                            let is_void = is_unit(&ok_type);
                            return Ok(ReturnTypeInfo {
                                ok_type,
                                full_type: ty,
                                is_void,
                            });
                        }
                    }
                }
            }
        }

        Err(Error::new_spanned(
            output,
            "remote methods must return Result<T, wirebus::CallError>",
        ))
    }
}

impl NotificationDefinition {
    /// Parse a `#[notification]` trait fn into a notification definition.
    pub fn parse(func: &TraitItemFn) -> Result<Self> {
        let sig = &func.sig;

        if sig.asyncness.is_some() {
            return Err(Error::new_spanned(
                sig,
                "notifications are one-way; declare them as plain fns",
            ));
        }
        require_shared_receiver(func)?;
        if !matches!(sig.output, ReturnType::Default) {
            return Err(Error::new_spanned(
                &sig.output,
                "notifications have no return value",
            ));
        }

        let attrs = func
            .attrs
            .iter()
            .filter(|a| !a.path().is_ident("notification"))
            .cloned()
            .collect();

        Ok(Self {
            name: sig.ident.clone(),
            args: parse_args(func)?,
            attrs,
        })
    }
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn is_call_error(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Path(path) if path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "CallError")
    )
}
