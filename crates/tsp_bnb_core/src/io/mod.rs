pub mod edge_list;
pub mod input;
pub mod options;
