//! Shared service definitions for the integration tests.

use std::sync::atomic::{AtomicU32, Ordering};

use wirebus::{remote_service, CallError};

#[remote_service(
    name = "org.test.Calc",
    path = "/org/test/Calc",
    interface = "org.test.Calc"
)]
pub trait Calc {
    async fn add(&self, a: i32, b: i32) -> Result<i32, CallError>;
    async fn reset(&self) -> Result<(), CallError>;
    async fn fail(&self) -> Result<(), CallError>;

    #[notification]
    fn computed(&self, index: u32, label: String);
}

/// A second, unrelated service; its facade must be rejected when connecting
/// to `Calc`.
#[remote_service(
    name = "org.test.Mixer",
    path = "/org/test/Mixer",
    interface = "org.test.Mixer"
)]
pub trait Mixer {
    async fn volume(&self) -> Result<u8, CallError>;
}

pub struct CalcImpl {
    notifications: CalcNotifications,
    resets: AtomicU32,
}

impl CalcImpl {
    pub fn new() -> Self {
        Self {
            notifications: CalcNotifications::new(),
            resets: AtomicU32::new(0),
        }
    }

    pub fn resets(&self) -> u32 {
        self.resets.load(Ordering::SeqCst)
    }
}

#[wirebus::async_trait]
impl Calc for CalcImpl {
    async fn add(&self, a: i32, b: i32) -> Result<i32, CallError> {
        Ok(a + b)
    }

    async fn reset(&self) -> Result<(), CallError> {
        self.resets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fail(&self) -> Result<(), CallError> {
        Err(CallError::service("calculator on fire"))
    }

    fn notifications(&self) -> &CalcNotifications {
        &self.notifications
    }
}
