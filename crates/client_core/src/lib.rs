//! Client side of the value-stream mapper: the editable process model, the
//! analysis and chat clients, and the presenter that folds results into view
//! state.

pub mod analysis;
pub mod chart;
pub mod chat;
pub mod editor;
pub mod error;
pub mod markup;
pub mod model;
pub mod presenter;
pub mod session;
pub mod store;
pub mod transport;

pub use analysis::AnalysisClient;
pub use chart::{ChartHandle, ChartRenderer, ChartSpec};
pub use chat::{Author, ChatClient, Transcript, TranscriptEntry};
pub use editor::{CellEdit, RowInput, StepEditor, TableView};
pub use error::{ClientError, ErrorCategory, TransportError, ValidationError};
pub use markup::Markup;
pub use model::{ProcessStep, StepPrefill, StepUpdate};
pub use presenter::{ResultsPresenter, ResultsView};
pub use session::{AnalysisApplied, AnalysisTicket, Session};
pub use store::StepStore;
pub use transport::{Backend, HttpBackend, MissingBackend};

#[cfg(test)]
pub(crate) mod test_support;
