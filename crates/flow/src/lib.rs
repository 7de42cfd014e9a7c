//! Flow controllers for the AuthnLens detection client.
//!
//! A flow owns the state of one detector page: what the user staged, the
//! service health gate, the request in flight and its normalized result.
//! Hosts feed it user events and render its accessors; every failure ends as
//! a [`Notification`](authnlens_core::Notification) on the channel from
//! [`Notifier::channel`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use authnlens_client::ClientConfig;
//! use authnlens_core::UploadFile;
//! use authnlens_flow::{AudioFlow, Notifier, PreviewRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientConfig::from_env().into_client()?;
//! let (notifier, mut notifications) = Notifier::channel();
//! let flow = AudioFlow::new(Arc::new(client), Arc::new(PreviewRegistry::new()), notifier);
//!
//! flow.check_health().await;
//! flow.select_file(UploadFile::new("clip.wav", "audio/wav", std::fs::read("clip.wav")?))?;
//! if flow.can_submit() {
//!     flow.analyze().await?;
//! }
//! while let Ok(note) = notifications.try_recv() {
//!     println!("{}: {}", note.title, note.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod error;
pub mod factcheck;
pub mod health;
pub mod notify;
pub mod preview;
pub mod token;

pub use audio::AudioFlow;
pub use error::{Settlement, SubmitError};
pub use factcheck::{DocumentDecode, EXAMPLE_CLAIMS, FactCheckFlow, InputMode, example_label};
pub use health::HealthMonitor;
pub use notify::{NotificationReceiver, Notifier};
pub use preview::{PreviewRef, PreviewRegistry};
pub use token::RequestToken;
