pub mod sample_request;
