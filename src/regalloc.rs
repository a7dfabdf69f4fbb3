//! Register scan: assigns one virtual register per IR node and collects
//! the dependency edges between nodes.
//!
//! Allocation is deliberately non-optimizing: register `i` belongs to IR
//! node `i`, so the register file is exactly as large as the IR array.
//! The dependency edges are not consumed anywhere yet; they are the input
//! a liveness-based reuse pass would start from.

use crate::lower::{IrId, IrNode};

/// A virtual register referenced by the emitted bytecode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegId(pub u32);

/// Result of the scan: the register map parallel to the IR array, and the
/// `(node, operand)` dependency edge list.
#[derive(Debug)]
pub struct Allocation {
  pub reglut: Vec<RegId>,
  pub irdeps: Vec<(IrId, IrId)>,
}

/// Walk the IR once, building the identity register map and recording one
/// edge per operand of every op node.
pub fn allocate(nodes: &[IrNode]) -> Allocation {
  let mut reglut = Vec::with_capacity(nodes.len());
  let mut irdeps = Vec::new();

  for (nr, node) in nodes.iter().enumerate() {
    let irid = IrId(nr as u32);
    if let IrNode::Op { args, .. } = node {
      for &arg in args {
        irdeps.push((irid, arg));
      }
    }
    reglut.push(RegId(irid.0));
  }

  Allocation { reglut, irdeps }
}
