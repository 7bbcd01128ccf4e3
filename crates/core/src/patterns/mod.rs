//! Line-level detectors run against an open document: test context, test
//! function names, doc tests and benchmark ids.

pub mod benchmark;
pub mod test_context;
pub mod test_fn;

pub use benchmark::find_benchmark_id;
pub use doc_test::{DocStyle, DocTestMatch, find_doc_test, handle_doc_attribute, handle_doc_test, handle_multiline_docs};
pub use test_context::{TEST_MODULE, contains_tests, is_cfg_test_line, is_in_test_context, is_inside_mod_tests};
pub use test_fn::{TestTarget, get_test_function_name, qualify_test_identifier};
