//! Export adapter generation.
//!
//! The export adapter is the service's bus presence: it registers the object
//! path and the service name, dispatches inbound string calls to the wrapped
//! implementation, and relays the implementation's notifications onto the
//! bus as signals.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{export_ident, tag_ident};
use crate::parse::ServiceDefinition;

pub fn generate_export(service: &ServiceDefinition) -> TokenStream {
    let vis = &service.vis;
    let name = &service.name;
    let export = export_ident(name);
    let tag = tag_ident(name);

    let dispatch_arms = service.methods.iter().map(|m| {
        let method = &m.name;
        let mname = m.name.to_string();
        let arity = m.args.len();
        let decodes = m.args.iter().enumerate().map(|(i, a)| {
            let arg = &a.name;
            let ty = &a.ty;
            quote! { let #arg: #ty = ::wirebus::unmarshal(&args[#i])?; }
        });
        let arg_names = m.args.iter().map(|a| &a.name);
        let invoke = if m.return_type.is_void {
            quote! {
                self.inner.#method(#(#arg_names),*).await?;
                Ok(::wirebus::wrap_void())
            }
        } else {
            quote! {
                let value = self.inner.#method(#(#arg_names),*).await?;
                Ok(::wirebus::wrap_return(&value))
            }
        };
        quote! {
            #mname => {
                ::wirebus::check_arity(#mname, args.len(), #arity)?;
                #(#decodes)*
                #invoke
            }
        }
    });

    let relays = service.notifications.iter().map(|n| {
        let nname = n.name.to_string();
        let subscribe = format_ident!("subscribe_{}", n.name);
        let pat_names = n.args.iter().map(|a| &a.name);
        let marshals = n.args.iter().map(|a| {
            let arg = &a.name;
            quote!(::wirebus::marshal(&#arg))
        });
        quote! {
            {
                let mut rx = self.inner.notifications().#subscribe();
                let bus = self.bus.clone();
                ::wirebus::tokio::spawn(async move {
                    loop {
                        match rx.recv().await {
                            Ok((#(#pat_names,)*)) => {
                                let args = ::std::vec![#(#marshals),*];
                                if let Err(err) = ::wirebus::Bus::emit(
                                    &*bus,
                                    #tag::OBJECT_PATH,
                                    #tag::INTERFACE_NAME,
                                    #nname,
                                    args,
                                )
                                .await
                                {
                                    ::wirebus::tracing::warn!(%err, signal = #nname, "signal emission failed");
                                }
                            }
                            Err(::wirebus::tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                            Err(::wirebus::tokio::sync::broadcast::error::RecvError::Closed) => break,
                        }
                    }
                });
            }
        }
    });

    let doc =
        format!("Export adapter: owns the bus presence of a `{name}` implementation.");

    quote! {
        #[doc = #doc]
        #vis struct #export<S: #name + 'static> {
            inner: ::std::sync::Arc<S>,
            bus: ::std::sync::Arc<dyn ::wirebus::Bus>,
        }

        impl<S: #name + 'static> ::core::fmt::Debug for #export<S> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(::core::stringify!(#export)).finish_non_exhaustive()
            }
        }

        impl<S: #name + 'static> #export<S> {
            /// Register `implementation` at the service's object path, claim
            /// its name, and start relaying its notifications onto the bus.
            ///
            /// Both registrations are mandatory; if either fails the adapter
            /// is not created. No rollback of the object registration is
            /// attempted when the name registration fails.
            pub async fn register(
                bus: ::std::sync::Arc<dyn ::wirebus::Bus>,
                implementation: ::std::sync::Arc<S>,
            ) -> ::core::result::Result<::std::sync::Arc<Self>, ::wirebus::RegisterError> {
                let export = ::std::sync::Arc::new(Self {
                    inner: implementation,
                    bus: bus.clone(),
                });
                ::wirebus::Bus::register_object(
                    &*bus,
                    #tag::OBJECT_PATH,
                    #tag::INTERFACE_NAME,
                    export.clone(),
                )
                .await
                .map_err(::wirebus::RegisterError::Object)?;
                ::wirebus::Bus::register_name(&*bus, #tag::SERVICE_NAME)
                    .await
                    .map_err(::wirebus::RegisterError::Name)?;
                export.spawn_notification_relays();
                ::wirebus::tracing::debug!(service = #tag::SERVICE_NAME, "export adapter registered");
                Ok(export)
            }

            /// Shared handle to the wrapped implementation.
            pub fn implementation(&self) -> &::std::sync::Arc<S> {
                &self.inner
            }

            fn spawn_notification_relays(&self) {
                #(#relays)*
            }
        }

        #[::wirebus::async_trait]
        impl<S: #name + 'static> ::wirebus::MethodHandler for #export<S> {
            async fn dispatch(
                &self,
                method: &str,
                args: ::std::vec::Vec<::std::string::String>,
            ) -> ::core::result::Result<::std::string::String, ::wirebus::CallError> {
                match method {
                    #(#dispatch_arms)*
                    other => Err(::wirebus::CallError::MethodNotFound(other.to_owned())),
                }
            }
        }
    }
}
