pub mod tree_node;
