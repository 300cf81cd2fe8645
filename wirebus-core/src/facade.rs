//! The capability contract implemented by generated access facades.

use std::sync::Arc;

use async_trait::async_trait;

use crate::bus::Bus;
use crate::descriptor::ServiceDescriptor;
use crate::error::ConnectError;

/// Lifecycle surface of a generated access facade.
///
/// A facade starts Unattached and moves to Attached at most once; there is
/// no detach transition short of dropping the facade. The directory
/// operations drive this transition through `attach`, which builds the
/// facade's import stub on the bus the facade was created with.
#[async_trait]
pub trait ServiceFacade: Send + Sync {
    /// The descriptor of the service this facade was generated for.
    fn descriptor(&self) -> &'static ServiceDescriptor;

    /// The bus instance this facade was configured with.
    fn bus(&self) -> Arc<dyn Bus>;

    /// Whether an import stub is currently bound.
    fn is_attached(&self) -> bool;

    /// Bind an import stub, completing the Unattached -> Attached
    /// transition. The stub's signal relay tasks are spawned on the
    /// calling runtime. Fails with `ConnectError::AlreadyAttached` if a
    /// stub is already bound; the existing binding is left untouched.
    async fn attach(&self) -> Result<(), ConnectError>;
}
