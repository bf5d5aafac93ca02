//! Tree file serialization.
//!
//! Nodes are written in pre-order. Each position in the tree is a block:
//!
//! ```text
//! +------------------+
//! | flag (1)         |  i8: 0 = absent, anything else = present
//! +------------------+
//! | symbol (4)       |  i32 LE code point (0 for internal nodes)   } only when
//! +------------------+                                              } present
//! | count (4)        |  i32 LE                                      }
//! +------------------+
//! | one-branch       |  block, recursively                          }
//! +------------------+                                              } only when
//! | zero-branch      |  block, recursively                          } present
//! +------------------+
//! ```
//!
//! A leaf is followed by two absent blocks. An empty stream, or a single
//! absent block, is a file without a tree. Codes are not stored.
//!
//! # Validation
//!
//! Internal counts must equal the sum of their children, and nesting deeper
//! than [`MAX_DEPTH`] is rejected before it can exhaust the stack.
//!
//! # Truncation
//!
//! End-of-stream is only accepted before the root's flag. A stream that ends
//! anywhere after that (inside a field, or before a child's flag) is reported
//! as a read error naming the field.

use crate::error::{NodeField, Result, TreeCodecError};
use crate::tree::{HuffmanTree, Node};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

const ABSENT: i8 = 0;
const PRESENT: i8 = 1;

/// Deepest nesting accepted on read. Counts are i32, and a Huffman tree of
/// depth d needs a root count of at least Fib(d + 2), so real trees stay
/// below 46 levels.
pub const MAX_DEPTH: usize = 64;

/// Write `root` (or an absent marker for `None`) in pre-order.
pub fn write_tree<W: Write>(writer: &mut W, root: Option<&Node>) -> Result<()> {
    write_node(writer, root)
}

fn write_node<W: Write>(writer: &mut W, node: Option<&Node>) -> Result<()> {
    let Some(node) = node else {
        return write_field(writer, NodeField::PresenceFlag, &ABSENT.to_le_bytes());
    };

    write_field(writer, NodeField::PresenceFlag, &PRESENT.to_le_bytes())?;

    let symbol = node.symbol().map_or(0, |c| c as i32);
    write_field(writer, NodeField::Symbol, &symbol.to_le_bytes())?;

    let count =
        i32::try_from(node.count()).map_err(|_| TreeCodecError::CountOverflow(node.count()))?;
    write_field(writer, NodeField::Count, &count.to_le_bytes())?;

    write_node(writer, node.child(true))?;
    write_node(writer, node.child(false))
}

fn write_field<W: Write>(writer: &mut W, field: NodeField, bytes: &[u8]) -> Result<()> {
    writer
        .write_all(bytes)
        .map_err(|source| TreeCodecError::Write { field, source })?;
    Ok(())
}

/// Read a tree written by [`write_tree`].
///
/// Returns `Ok(None)` when the stream is empty or starts with an absent flag.
pub fn read_tree<R: Read>(reader: &mut R) -> Result<Option<Node>> {
    let mut flag = [0u8; 1];
    match reader.read_exact(&mut flag) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(source) => {
            return Err(TreeCodecError::Read {
                field: NodeField::PresenceFlag,
                source,
            }
            .into())
        }
    }
    read_present_node(reader, flag[0] as i8, 0)
}

fn read_node<R: Read>(reader: &mut R, depth: usize) -> Result<Option<Node>> {
    let mut flag = [0u8; 1];
    read_field(reader, NodeField::PresenceFlag, &mut flag)?;
    read_present_node(reader, flag[0] as i8, depth)
}

fn read_present_node<R: Read>(reader: &mut R, flag: i8, depth: usize) -> Result<Option<Node>> {
    if flag == ABSENT {
        return Ok(None);
    }
    if depth > MAX_DEPTH {
        return Err(TreeCodecError::TooDeep { max: MAX_DEPTH }.into());
    }

    let mut buf = [0u8; 4];
    read_field(reader, NodeField::Symbol, &mut buf)?;
    let raw_symbol = i32::from_le_bytes(buf);

    read_field(reader, NodeField::Count, &mut buf)?;
    let raw_count = i32::from_le_bytes(buf);
    let count = u64::try_from(raw_count).map_err(|_| TreeCodecError::NegativeCount(raw_count))?;

    let one = read_node(reader, depth + 1)?;
    let zero = read_node(reader, depth + 1)?;

    let node = match (one, zero) {
        (None, None) => {
            let symbol = u32::try_from(raw_symbol)
                .ok()
                .and_then(char::from_u32)
                .ok_or(TreeCodecError::InvalidSymbol(raw_symbol))?;
            Node::leaf(symbol, count)
        }
        (Some(one), Some(zero)) => {
            let children = one.count() + zero.count();
            if children != count {
                return Err(TreeCodecError::CountMismatch {
                    count: raw_count,
                    children,
                }
                .into());
            }
            Node::Internal {
                count,
                code: String::new(),
                one: Box::new(one),
                zero: Box::new(zero),
            }
        }
        _ => return Err(TreeCodecError::SingleChild { count: raw_count }.into()),
    };
    Ok(Some(node))
}

fn read_field<R: Read>(reader: &mut R, field: NodeField, buf: &mut [u8]) -> Result<()> {
    reader
        .read_exact(buf)
        .map_err(|source| TreeCodecError::Read { field, source })?;
    Ok(())
}

/// Save `tree` to a new file at `path`, replacing any existing file.
pub fn save_tree(path: impl AsRef<Path>, tree: &HuffmanTree) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| TreeCodecError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    write_tree(&mut writer, Some(tree.root()))?;
    writer.flush().map_err(TreeCodecError::Flush)?;

    log::info!(
        "saved tree of {} nodes to {}",
        tree.node_count(),
        path.display()
    );
    Ok(())
}

/// Load a tree saved by [`save_tree`].
///
/// Returns `Ok(None)` for a file that holds no root node. Codes are empty
/// until [`HuffmanTree::assign_codes`] is called.
pub fn load_tree(path: impl AsRef<Path>) -> Result<Option<HuffmanTree>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TreeCodecError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = read_tree(&mut BufReader::new(file))?.map(HuffmanTree::from_root);
    match &tree {
        Some(tree) => log::info!(
            "loaded tree of {} nodes from {}",
            tree.node_count(),
            path.display()
        ),
        None => log::warn!("{} holds no tree", path.display()),
    }
    Ok(tree)
}
