//! Code generation for the remote_service macro.
//!
//! Generation is split by role: the notification hub, the export adapter,
//! the import stub, and the access facade each have their own module. This
//! module holds the shared naming scheme, the service trait rewrite, and the
//! service tag with its static descriptor.

mod export;
mod facade;
mod import;
mod notify;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, ItemTrait, Result, Type};

use crate::parse::{BusChoice, ServiceArgs, ServiceDefinition};

/// Generate the full expansion for one service trait.
pub fn generate_service(args: ServiceArgs, item: ItemTrait) -> Result<TokenStream> {
    let service = ServiceDefinition::parse(item)?;

    let trait_def = generate_trait(&service);
    let hub = notify::generate_hub(&service);
    let tag = generate_tag(&args, &service);
    let export = export::generate_export(&service);
    let import = import::generate_import(&service);
    let facade = facade::generate_facade(&service);

    Ok(quote! {
        #trait_def
        #hub
        #tag
        #export
        #import
        #facade
    })
}

pub(crate) fn hub_ident(name: &Ident) -> Ident {
    format_ident!("{}Notifications", name)
}

pub(crate) fn tag_ident(name: &Ident) -> Ident {
    format_ident!("{}Service", name)
}

pub(crate) fn export_ident(name: &Ident) -> Ident {
    format_ident!("{}Export", name)
}

pub(crate) fn import_ident(name: &Ident) -> Ident {
    format_ident!("{}Import", name)
}

pub(crate) fn facade_ident(name: &Ident) -> Ident {
    format_ident!("{}Facade", name)
}

/// Opaque tag a type gets in the service descriptor.
pub(crate) fn type_tag(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

/// Rewrite the service trait: methods kept as declared, notifications given
/// default bodies that fire the hub, plus the hub accessor.
fn generate_trait(service: &ServiceDefinition) -> TokenStream {
    let attrs = &service.attrs;
    let vis = &service.vis;
    let name = &service.name;
    let hub = hub_ident(name);

    let methods = service.methods.iter().map(|m| {
        let attrs = &m.attrs;
        let method = &m.name;
        let params = m.args.iter().map(|a| {
            let name = &a.name;
            let ty = &a.ty;
            quote! { #name: #ty }
        });
        let ret = &m.return_type.full_type;
        quote! {
            #(#attrs)*
            async fn #method(&self #(, #params)*) -> #ret;
        }
    });

    let notifications = service.notifications.iter().map(|n| {
        let attrs = &n.attrs;
        let notification = &n.name;
        let emit = format_ident!("emit_{}", notification);
        let params = n.args.iter().map(|a| {
            let name = &a.name;
            let ty = &a.ty;
            quote! { #name: #ty }
        });
        let arg_names = n.args.iter().map(|a| &a.name);
        quote! {
            #(#attrs)*
            fn #notification(&self #(, #params)*) {
                self.notifications().#emit(#(#arg_names),*);
            }
        }
    });

    quote! {
        #(#attrs)*
        #[::wirebus::async_trait]
        #vis trait #name: Send + Sync {
            #(#methods)*

            /// The notification hub backing this service instance.
            fn notifications(&self) -> &#hub;

            #(#notifications)*
        }
    }
}

/// Generate the service tag: addressing constants, the static descriptor,
/// and the lifecycle helpers for both sides of the bus.
fn generate_tag(args: &ServiceArgs, service: &ServiceDefinition) -> TokenStream {
    let vis = &service.vis;
    let name = &service.name;
    let tag = tag_ident(name);
    let export = export_ident(name);
    let facade = facade_ident(name);

    let service_name = &args.service_name;
    let object_path = &args.object_path;
    let interface_name = &args.interface_name;
    let bus_selector = match args.bus {
        BusChoice::System => quote!(::wirebus::BusSelector::System),
        BusChoice::Session => quote!(::wirebus::BusSelector::Session),
        BusChoice::Custom => quote!(::wirebus::BusSelector::Custom),
    };

    let method_sigs = service.methods.iter().map(|m| {
        let mname = m.name.to_string();
        let params = m.args.iter().map(|a| type_tag(&a.ty));
        let returns = if m.return_type.is_void {
            quote!(::core::option::Option::None)
        } else {
            let tag = type_tag(&m.return_type.ok_type);
            quote!(::core::option::Option::Some(#tag))
        };
        quote! {
            ::wirebus::MethodSignature {
                name: #mname,
                params: &[#(#params),*],
                returns: #returns,
            }
        }
    });

    let notification_sigs = service.notifications.iter().map(|n| {
        let nname = n.name.to_string();
        let params = n.args.iter().map(|a| type_tag(&a.ty));
        quote! {
            ::wirebus::NotificationSignature {
                name: #nname,
                params: &[#(#params),*],
            }
        }
    });

    let doc = format!(
        "Service tag for `{name}`: addressing constants, the descriptor, and lifecycle helpers."
    );

    quote! {
        #[doc = #doc]
        #vis struct #tag;

        impl #tag {
            /// Logical bus name the service registers under.
            pub const SERVICE_NAME: &'static str = #service_name;
            /// Object path the export adapter registers at.
            pub const OBJECT_PATH: &'static str = #object_path;
            /// Interface name used for calls and signals.
            pub const INTERFACE_NAME: &'static str = #interface_name;

            /// The descriptor shared by all three generated roles.
            pub fn descriptor() -> &'static ::wirebus::ServiceDescriptor {
                static DESCRIPTOR: ::wirebus::ServiceDescriptor = ::wirebus::ServiceDescriptor {
                    service_name: #service_name,
                    object_path: #object_path,
                    interface_name: #interface_name,
                    bus: #bus_selector,
                    methods: &[#(#method_sigs),*],
                    notifications: &[#(#notification_sigs),*],
                };
                &DESCRIPTOR
            }

            /// Put `implementation` on `bus` as this service's export adapter.
            pub async fn register<S>(
                bus: ::std::sync::Arc<dyn ::wirebus::Bus>,
                implementation: ::std::sync::Arc<S>,
            ) -> ::core::result::Result<::std::sync::Arc<#export<S>>, ::wirebus::RegisterError>
            where
                S: #name + 'static,
            {
                #export::register(bus, implementation).await
            }

            /// Create an unattached facade on `bus`.
            #[must_use]
            pub fn create(bus: ::std::sync::Arc<dyn ::wirebus::Bus>) -> #facade {
                #facade::new(bus)
            }

            /// Connect `facade` to the registered service.
            pub async fn connect(
                facade: &#facade,
            ) -> ::core::result::Result<(), ::wirebus::ConnectError> {
                ::wirebus::directory::connect_service(Self::descriptor(), facade).await
            }

            /// Wait for the service to register, then connect `facade` to it.
            pub async fn wait_and_connect(
                facade: &#facade,
            ) -> ::core::result::Result<(), ::wirebus::ConnectError> {
                ::wirebus::directory::wait_and_connect_service(Self::descriptor(), facade).await
            }

            /// Create a facade on `bus` and connect it in one step.
            pub async fn create_and_connect(
                bus: ::std::sync::Arc<dyn ::wirebus::Bus>,
            ) -> ::core::result::Result<#facade, ::wirebus::ConnectError> {
                let facade = Self::create(bus);
                Self::connect(&facade).await?;
                Ok(facade)
            }
        }
    }
}
