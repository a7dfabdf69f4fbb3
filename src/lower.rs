//! Lowering: flattens the AST into an indexed IR array.
//!
//! The IR deliberately has no pointers between nodes. Nodes live in one
//! append-only vector and refer to each other by index, so a node's
//! operands always sit at smaller indices than the node itself. That
//! ordering is what the register scan and the emitter rely on.

use crate::parser::Ast;
use crate::tokenizer::{Op, Token};

/// Index of an IR node in the flat array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IrId(pub u32);

/// One IR node. `Empty` is the placeholder variant of the sum; the
/// current lowering never produces it because every token shape maps to
/// one of the other four.
#[derive(Debug, Clone, PartialEq)]
pub enum IrNode {
  Empty,
  ConstInt { val: i32 },
  ConstFloat { val: f32 },
  Op { op: Op, args: Vec<IrId> },
  Sym { name: String },
}

/// The flat IR array plus the id of the program root.
#[derive(Debug)]
pub struct Lowering {
  pub nodes: Vec<IrNode>,
  pub root: IrId,
}

/// Lower an AST into post-order IR. Total: every AST shape has a
/// lowering.
pub fn lower(ast: &Ast) -> Lowering {
  let mut nodes = Vec::new();
  let root = visit(ast, &mut nodes);
  Lowering { nodes, root }
}

fn visit(ast: &Ast, nodes: &mut Vec<IrNode>) -> IrId {
  let node = match &ast.token {
    Token::Ident(name) => IrNode::Sym { name: name.clone() },
    Token::Op(op) => {
      let args = ast.children.iter().map(|ch| visit(ch, nodes)).collect();
      IrNode::Op { op: *op, args }
    }
    Token::Int(val) => IrNode::ConstInt { val: *val },
    Token::Float(val) => IrNode::ConstFloat { val: *val },
  };
  let id = IrId(nodes.len() as u32);
  nodes.push(node);
  id
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse;
  use crate::tokenizer::tokenize;

  fn lower_src(src: &str) -> Lowering {
    lower(&parse(tokenize(src).unwrap().tokens).unwrap())
  }

  #[test]
  fn empty_program_lowers_to_one_node() {
    let lowering = lower_src("");
    assert_eq!(
      lowering.nodes,
      vec![IrNode::Op {
        op: Op::Semicolon,
        args: vec![],
      }]
    );
    assert_eq!(lowering.root, IrId(0));
  }

  #[test]
  fn literal_statement() {
    let lowering = lower_src("42;");
    assert_eq!(
      lowering.nodes,
      vec![
        IrNode::ConstInt { val: 42 },
        IrNode::Op {
          op: Op::Semicolon,
          args: vec![IrId(0)],
        },
      ]
    );
    assert_eq!(lowering.root, IrId(1));
  }

  #[test]
  fn binary_expression_is_post_order() {
    let lowering = lower_src("1 + 2;");
    assert_eq!(
      lowering.nodes,
      vec![
        IrNode::ConstInt { val: 1 },
        IrNode::ConstInt { val: 2 },
        IrNode::Op {
          op: Op::Plus,
          args: vec![IrId(0), IrId(1)],
        },
        IrNode::Op {
          op: Op::Semicolon,
          args: vec![IrId(2)],
        },
      ]
    );
  }

  #[test]
  fn symbols_keep_their_names() {
    let lowering = lower_src("@clr;");
    assert_eq!(
      lowering.nodes[0],
      IrNode::Sym {
        name: "@clr".to_string(),
      }
    );
  }

  #[test]
  fn multiply_lowers_before_the_enclosing_plus() {
    let lowering = lower_src("1 + 2 * 3;");
    let mul = lowering
      .nodes
      .iter()
      .position(|n| matches!(n, IrNode::Op { op: Op::Multiply, .. }))
      .unwrap();
    let plus = lowering
      .nodes
      .iter()
      .position(|n| matches!(n, IrNode::Op { op: Op::Plus, .. }))
      .unwrap();
    assert!(mul < plus);
  }

  #[test]
  fn op_arguments_always_precede_the_op() {
    let lowering = lower_src("a + b * c; x = y; 1, 2;");
    for (i, node) in lowering.nodes.iter().enumerate() {
      if let IrNode::Op { args, .. } = node {
        for arg in args {
          assert!((arg.0 as usize) < i);
        }
      }
    }
  }
}
