//! Parsers for archive documents: YAML header blocks and filenames.

pub mod filename;
pub mod frontmatter;

pub use filename::{parse_filename, FilenameInfo};
pub use frontmatter::{
    parse_frontmatter, read_frontmatter, replace_frontmatter, serialize_frontmatter,
    split_frontmatter, strip_frontmatter,
};
