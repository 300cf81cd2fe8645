//! Notification hub generation.
//!
//! Every service gets one hub type holding a typed broadcast channel per
//! notification. The hub is `Clone`; clones share the same channels, which
//! is how an import stub relays bus signals into the hub its facade hands
//! out to subscribers.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::hub_ident;
use crate::parse::ServiceDefinition;

pub fn generate_hub(service: &ServiceDefinition) -> TokenStream {
    let vis = &service.vis;
    let name = &service.name;
    let hub = hub_ident(name);

    let fields = service.notifications.iter().map(|n| {
        let field = &n.name;
        let tys = n.args.iter().map(|a| &a.ty);
        quote! { #field: ::wirebus::tokio::sync::broadcast::Sender<(#(#tys,)*)> }
    });

    let inits = service.notifications.iter().map(|n| {
        let field = &n.name;
        quote! {
            #field: ::wirebus::tokio::sync::broadcast::channel(::wirebus::DEFAULT_SIGNAL_CAPACITY).0
        }
    });

    let channels = service.notifications.iter().map(|n| {
        let field = &n.name;
        let emit = format_ident!("emit_{}", field);
        let subscribe = format_ident!("subscribe_{}", field);
        let params = n.args.iter().map(|a| {
            let name = &a.name;
            let ty = &a.ty;
            quote! { #name: #ty }
        });
        let arg_names = n.args.iter().map(|a| &a.name);
        let tys = n.args.iter().map(|a| &a.ty);
        let emit_doc = format!("Emit the `{field}` notification to current subscribers.");
        let subscribe_doc = format!("Subscribe to the `{field}` notification.");
        quote! {
            #[doc = #emit_doc]
            pub fn #emit(&self #(, #params)*) {
                // A send error only means nobody is subscribed right now.
                let _ = self.#field.send((#(#arg_names,)*));
            }

            #[doc = #subscribe_doc]
            pub fn #subscribe(&self) -> ::wirebus::tokio::sync::broadcast::Receiver<(#(#tys,)*)> {
                self.#field.subscribe()
            }
        }
    });

    let doc = format!("Typed notification channels for `{name}`.");

    quote! {
        #[doc = #doc]
        #[derive(Clone)]
        #vis struct #hub {
            #(#fields,)*
        }

        impl #hub {
            /// Create a hub with no subscribers.
            #[must_use]
            pub fn new() -> Self {
                Self {
                    #(#inits,)*
                }
            }

            #(#channels)*
        }

        impl ::core::default::Default for #hub {
            fn default() -> Self {
                Self::new()
            }
        }
    }
}
