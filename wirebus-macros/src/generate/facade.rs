//! Access facade generation.
//!
//! The facade is the caller-facing handle. It starts unattached, fails
//! every call with `CallError::NotAttached` without touching the bus, and
//! moves to attached at most once when a directory connect succeeds. The
//! facade also implements the service trait, delegating to the import stub
//! once one is bound.

use proc_macro2::TokenStream;
use quote::quote;

use super::{facade_ident, hub_ident, import_ident, tag_ident};
use crate::parse::ServiceDefinition;

pub fn generate_facade(service: &ServiceDefinition) -> TokenStream {
    let vis = &service.vis;
    let name = &service.name;
    let facade = facade_ident(name);
    let import = import_ident(name);
    let tag = tag_ident(name);
    let hub = hub_ident(name);

    let methods = service.methods.iter().map(|m| {
        let method = &m.name;
        let params = m.args.iter().map(|a| {
            let name = &a.name;
            let ty = &a.ty;
            quote! { #name: #ty }
        });
        let arg_names = m.args.iter().map(|a| &a.name);
        let ret = &m.return_type.full_type;
        quote! {
            async fn #method(&self #(, #params)*) -> #ret {
                self.import()?.#method(#(#arg_names),*).await
            }
        }
    });

    let doc = format!(
        "Access facade: the caller-facing `{name}` handle with attach-once lifecycle."
    );

    quote! {
        #[doc = #doc]
        #vis struct #facade {
            bus: ::std::sync::Arc<dyn ::wirebus::Bus>,
            notifications: #hub,
            import: ::std::sync::OnceLock<#import>,
        }

        impl #facade {
            /// Create an unattached facade on `bus`. Calls fail with
            /// `CallError::NotAttached` until a directory connect succeeds.
            #[must_use]
            pub fn new(bus: ::std::sync::Arc<dyn ::wirebus::Bus>) -> Self {
                Self {
                    bus,
                    notifications: #hub::new(),
                    import: ::std::sync::OnceLock::new(),
                }
            }

            fn import(&self) -> ::core::result::Result<&#import, ::wirebus::CallError> {
                self.import
                    .get()
                    .ok_or(::wirebus::CallError::NotAttached(#tag::SERVICE_NAME))
            }
        }

        #[::wirebus::async_trait]
        impl ::wirebus::ServiceFacade for #facade {
            fn descriptor(&self) -> &'static ::wirebus::ServiceDescriptor {
                #tag::descriptor()
            }

            fn bus(&self) -> ::std::sync::Arc<dyn ::wirebus::Bus> {
                self.bus.clone()
            }

            fn is_attached(&self) -> bool {
                self.import.get().is_some()
            }

            async fn attach(&self) -> ::core::result::Result<(), ::wirebus::ConnectError> {
                if self.import.get().is_some() {
                    return Err(::wirebus::ConnectError::AlreadyAttached(#tag::SERVICE_NAME));
                }
                let stub = #import::attach(self.bus.clone(), self.notifications.clone());
                self.import
                    .set(stub)
                    .map_err(|_| ::wirebus::ConnectError::AlreadyAttached(#tag::SERVICE_NAME))
            }
        }

        #[::wirebus::async_trait]
        impl #name for #facade {
            #(#methods)*

            fn notifications(&self) -> &#hub {
                &self.notifications
            }
        }
    }
}
