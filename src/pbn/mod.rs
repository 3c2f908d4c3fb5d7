pub mod reader;

pub use reader::{is_pbn_path, parse_deal_line, PBN_DEAL_PREFIX};
