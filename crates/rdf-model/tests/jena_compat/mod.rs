// Jena compatibility test module
// Ports key tests from Apache Jena to ensure feature parity

pub mod node_tests;
pub mod triple_tests;
pub mod literal_tests;
pub mod resource_tests;
pub mod blank_node_tests;
pub mod quoted_triple_tests;
pub mod vocabulary_tests;
pub mod datatype_tests;
pub mod namespace_tests;
pub mod equality_tests;
