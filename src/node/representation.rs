//! A compact binary encoding of expression trees.
//!
//! A tree is stored in pre-order. Every node starts with a tag byte whose
//! lower three bits hold the node type. Arithmetic nodes store their operation
//! in the two bits above the type. Constants are followed by their value as a
//! little-endian `f64`.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use bytes::{Buf, BufMut};
use std::io::{Read, Write};

use crate::error::{CalculusError, Result};

use super::{ArithmeticOp, Node, MAX_DEPTH};

const CONST_ID: u8 = 1;
const VAR_ID: u8 = 2;
const NEG_ID: u8 = 3;
const ARITH_ID: u8 = 4;
const POW_ID: u8 = 5;
const LOG_ID: u8 = 6;
const TYPE_MASK: u8 = 0b00000111;
const OP_MASK: u8 = 0b00110000;
const OP_SHIFT: u8 = 4;

const FORMAT_VERSION: u8 = 1;

pub type RawNode = Vec<u8>;

impl ArithmeticOp {
    fn to_bits(self) -> u8 {
        match self {
            ArithmeticOp::Add => 0,
            ArithmeticOp::Subtract => 1,
            ArithmeticOp::Multiply => 2,
            ArithmeticOp::Divide => 3,
        }
    }

    fn from_bits(bits: u8) -> ArithmeticOp {
        match bits & 0b11 {
            0 => ArithmeticOp::Add,
            1 => ArithmeticOp::Subtract,
            2 => ArithmeticOp::Multiply,
            _ => ArithmeticOp::Divide,
        }
    }
}

impl Node {
    /// Encode the tree into a flat byte buffer.
    pub fn to_raw(&self) -> RawNode {
        let mut dest = Vec::with_capacity(self.len() * 2);
        self.write_raw(&mut dest);
        dest
    }

    fn write_raw(&self, dest: &mut RawNode) {
        match self {
            Node::Constant(c) => {
                dest.put_u8(CONST_ID);
                dest.put_f64_le(*c);
            }
            Node::Variable => dest.put_u8(VAR_ID),
            Node::Negate(n) => {
                dest.put_u8(NEG_ID);
                n.write_raw(dest);
            }
            Node::Arithmetic(l, r, op) => {
                dest.put_u8(ARITH_ID | (op.to_bits() << OP_SHIFT));
                l.write_raw(dest);
                r.write_raw(dest);
            }
            Node::Power(b, e) => {
                dest.put_u8(POW_ID);
                b.write_raw(dest);
                e.write_raw(dest);
            }
            Node::Logarithm(b, a) => {
                dest.put_u8(LOG_ID);
                b.write_raw(dest);
                a.write_raw(dest);
            }
        }
    }

    /// Decode a tree from a buffer created by [`Node::to_raw()`].
    ///
    /// Trees nested deeper than [`MAX_DEPTH`] are rejected as corrupt.
    pub fn from_raw(mut source: &[u8]) -> Result<Node> {
        let node = Self::read_raw(&mut source, 0)?;

        if source.has_remaining() {
            return Err(CalculusError::CorruptData(format!(
                "{} trailing bytes after expression",
                source.remaining()
            )));
        }

        Ok(node)
    }

    fn read_raw(source: &mut &[u8], depth: usize) -> Result<Node> {
        if depth > MAX_DEPTH {
            return Err(CalculusError::CorruptData(format!(
                "expression nested deeper than {}",
                MAX_DEPTH
            )));
        }

        if !source.has_remaining() {
            return Err(CalculusError::CorruptData(
                "unexpected end of expression data".to_owned(),
            ));
        }

        let tag = source.get_u8();
        match tag & TYPE_MASK {
            CONST_ID => {
                if source.remaining() < 8 {
                    return Err(CalculusError::CorruptData(
                        "truncated constant".to_owned(),
                    ));
                }
                Ok(Node::Constant(source.get_f64_le()))
            }
            VAR_ID => Ok(Node::Variable),
            NEG_ID => Ok(Node::Negate(Box::new(Self::read_raw(source, depth + 1)?))),
            ARITH_ID => {
                let op = ArithmeticOp::from_bits((tag & OP_MASK) >> OP_SHIFT);
                let l = Self::read_raw(source, depth + 1)?;
                let r = Self::read_raw(source, depth + 1)?;
                Ok(Node::Arithmetic(Box::new(l), Box::new(r), op))
            }
            POW_ID => {
                let b = Self::read_raw(source, depth + 1)?;
                let e = Self::read_raw(source, depth + 1)?;
                Ok(Node::Power(Box::new(b), Box::new(e)))
            }
            LOG_ID => {
                let b = Self::read_raw(source, depth + 1)?;
                let a = Self::read_raw(source, depth + 1)?;
                Ok(Node::Logarithm(Box::new(b), Box::new(a)))
            }
            x => Err(CalculusError::CorruptData(format!("unknown node type {}", x))),
        }
    }

    /// Write the expression to a binary stream. The format is a version byte and
    /// the byte-length first, followed by the data.
    pub fn write<W: Write>(&self, mut dest: W) -> Result<()> {
        let d = self.to_raw();
        dest.write_u8(FORMAT_VERSION)?;
        dest.write_u64::<LittleEndian>(d.len() as u64)?;
        dest.write_all(&d)?;
        Ok(())
    }

    /// Read an expression from a binary stream written by [`Node::write()`].
    pub fn import<R: Read>(mut source: R) -> Result<Node> {
        let version = source.read_u8()?;
        if version != FORMAT_VERSION {
            return Err(CalculusError::CorruptData(format!(
                "unsupported format version {}",
                version
            )));
        }

        let n_size = source.read_u64::<LittleEndian>()?;
        let mut data = vec![];
        source.take(n_size).read_to_end(&mut data)?;
        if (data.len() as u64) < n_size {
            return Err(CalculusError::CorruptData(format!(
                "expected {} bytes of expression data, found {}",
                n_size,
                data.len()
            )));
        }

        Node::from_raw(&data)
    }
}
