//! Bytecode emission: linearizes the IR into 32-bit code words and
//! interns symbol names along the way.
//!
//! Instructions are appended in IR index order, so the code stream mirrors
//! the post-order shape of the source program. Every instruction is
//! `[opcode, dest_reg, operands...]` with one exception: `AddrSymbol`
//! carries the symbol table index in place of a destination register.

use std::collections::HashMap;

use crate::bytecode::{Bc, Word};
use crate::lower::IrNode;
use crate::regalloc::RegId;
use crate::tokenizer::Op;

/// Interned symbol table index, contiguous from 0 in first-seen order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymId(pub u32);

/// Deduplicating name table. The forward map answers "seen before?"; the
/// reverse vector becomes the emitted string table.
#[derive(Debug, Default)]
struct SymTable {
  lut: HashMap<String, SymId>,
  names: Vec<String>,
}

impl SymTable {
  fn intern(&mut self, name: &str) -> SymId {
    if let Some(&id) = self.lut.get(name) {
      return id;
    }
    let id = SymId(self.names.len() as u32);
    self.names.push(name.to_string());
    self.lut.insert(name.to_string(), id);
    id
  }
}

/// The emitted artifact: the linear code stream plus the symbol name
/// table indexed by `SymId`.
#[derive(Debug)]
pub struct Emitted {
  pub codes: Vec<Word>,
  pub syms: Vec<String>,
}

struct Emitter<'a> {
  reglut: &'a [RegId],
  codes: Vec<Word>,
  symtab: SymTable,
}

impl Emitter<'_> {
  fn emit_bc(&mut self, bc: Bc) {
    self.codes.push(bc as Word);
  }

  fn emit_reg(&mut self, reg: RegId) {
    self.codes.push(reg.0);
  }

  fn emit_sym(&mut self, name: &str) {
    let id = self.symtab.intern(name);
    self.codes.push(id.0);
  }

  /// Immediates are reinterpreted into the word, not converted; the VM
  /// reverses the cast on load.
  fn emit_int(&mut self, x: i32) {
    self.codes.push(x as u32);
  }

  fn emit_float(&mut self, x: f32) {
    self.codes.push(x.to_bits());
  }

  fn generate(&mut self, nodes: &[IrNode]) {
    for (nr, node) in nodes.iter().enumerate() {
      match node {
        IrNode::ConstInt { val } => {
          self.emit_bc(Bc::LoadConstInt);
          self.emit_reg(self.reglut[nr]);
          self.emit_int(*val);
        }
        IrNode::ConstFloat { val } => {
          self.emit_bc(Bc::LoadConstFloat);
          self.emit_reg(self.reglut[nr]);
          self.emit_float(*val);
        }
        IrNode::Op { op, args } => {
          if let Some(bc) = Bc::for_op(*op) {
            self.emit_bc(bc);
            self.emit_reg(self.reglut[nr]);
            for arg in args {
              self.emit_reg(self.reglut[arg.0 as usize]);
            }
          } else if *op == Op::Assign {
            // Assignment is parsed but has no encoding; nothing is
            // emitted for it. Compound assignments and the structural
            // ops fall through the same way.
          }
        }
        IrNode::Sym { name } => {
          self.emit_bc(Bc::AddrSymbol);
          self.emit_sym(name);
        }
        IrNode::Empty => {}
      }
    }
  }
}

/// Emit the code stream for a scanned IR array.
pub fn emit(nodes: &[IrNode], reglut: &[RegId]) -> Emitted {
  let mut emitter = Emitter {
    reglut,
    codes: Vec::new(),
    symtab: SymTable::default(),
  };
  emitter.generate(nodes);
  Emitted {
    codes: emitter.codes,
    syms: emitter.symtab.names,
  }
}
