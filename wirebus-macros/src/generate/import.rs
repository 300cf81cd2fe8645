//! Import stub generation.
//!
//! The import stub is the client-side half of a call: it implements the
//! service trait by marshaling arguments, performing the bus round-trip,
//! and decoding the reply. On construction it also subscribes to the
//! service's signals and relays them into the notification hub it shares
//! with the facade that built it.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{hub_ident, import_ident, tag_ident};
use crate::parse::ServiceDefinition;

pub fn generate_import(service: &ServiceDefinition) -> TokenStream {
    let vis = &service.vis;
    let name = &service.name;
    let import = import_ident(name);
    let tag = tag_ident(name);
    let hub = hub_ident(name);

    let relays = service.notifications.iter().map(|n| {
        let nname = n.name.to_string();
        let emit = format_ident!("emit_{}", n.name);
        let arity = n.args.len();
        let decodes = n.args.iter().enumerate().map(|(i, a)| {
            let arg = &a.name;
            let ty = &a.ty;
            quote! {
                let #arg: #ty = match ::wirebus::unmarshal(&args[#i]) {
                    Ok(value) => value,
                    Err(err) => {
                        ::wirebus::tracing::warn!(%err, signal = #nname, "dropping malformed notification");
                        continue;
                    }
                };
            }
        });
        let arg_names = n.args.iter().map(|a| &a.name);
        quote! {
            {
                let mut rx = ::wirebus::Bus::subscribe(
                    &*bus,
                    #tag::OBJECT_PATH,
                    #tag::INTERFACE_NAME,
                    #nname,
                );
                let hub = notifications.clone();
                ::wirebus::tokio::spawn(async move {
                    loop {
                        match rx.recv().await {
                            Ok(args) => {
                                if args.len() != #arity {
                                    ::wirebus::tracing::warn!(
                                        signal = #nname,
                                        got = args.len(),
                                        "dropping notification with wrong argument count",
                                    );
                                    continue;
                                }
                                #(#decodes)*
                                hub.#emit(#(#arg_names),*);
                            }
                            Err(::wirebus::tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                            Err(::wirebus::tokio::sync::broadcast::error::RecvError::Closed) => break,
                        }
                    }
                });
            }
        }
    });

    let methods = service.methods.iter().map(|m| {
        let method = &m.name;
        let mname = m.name.to_string();
        let params = m.args.iter().map(|a| {
            let name = &a.name;
            let ty = &a.ty;
            quote! { #name: #ty }
        });
        let marshals = m.args.iter().map(|a| {
            let arg = &a.name;
            quote!(::wirebus::marshal(&#arg))
        });
        let ret = &m.return_type.full_type;
        let reply = if m.return_type.is_void {
            quote! {
                ::wirebus::unwrap_void(&reply);
                Ok(())
            }
        } else {
            quote! {
                Ok(::wirebus::unwrap_return(&reply)?)
            }
        };
        quote! {
            async fn #method(&self #(, #params)*) -> #ret {
                let args = ::std::vec![#(#marshals),*];
                let reply = ::wirebus::Bus::call(
                    &*self.bus,
                    #tag::SERVICE_NAME,
                    #tag::OBJECT_PATH,
                    #tag::INTERFACE_NAME,
                    #mname,
                    args,
                )
                .await?;
                #reply
            }
        }
    });

    let doc = format!(
        "Import stub: performs `{name}` calls as string round-trips over the bus."
    );

    quote! {
        #[doc = #doc]
        #vis struct #import {
            bus: ::std::sync::Arc<dyn ::wirebus::Bus>,
            notifications: #hub,
        }

        impl #import {
            /// Build a stub on `bus`, relaying the service's signals into
            /// `notifications`.
            pub fn attach(
                bus: ::std::sync::Arc<dyn ::wirebus::Bus>,
                notifications: #hub,
            ) -> Self {
                #(#relays)*
                Self { bus, notifications }
            }
        }

        #[::wirebus::async_trait]
        impl #name for #import {
            #(#methods)*

            fn notifications(&self) -> &#hub {
                &self.notifications
            }
        }
    }
}
