//! UI components for the Samarth client

mod answer_panel;
mod charts;
mod query_form;
mod sample_questions;

pub use answer_panel::AnswerPanel;
pub use charts::BarChart;
pub use query_form::QueryForm;
pub use sample_questions::SampleQuestions;
