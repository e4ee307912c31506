mod run_request;
pub use run_request::RunPlaybookRequest;
