//! Stack manipulation operations for the Neo Virtual Machine.
//!
//! This module provides the handlers for opcodes that rearrange items on the
//! evaluation stack without otherwise transforming them (DUP, SWAP, PICK, ...).

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use num_traits::ToPrimitive;

/// Registers the stack operation handlers.
pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::DEPTH, depth);
    jump_table.register(OpCode::DROP, drop_top);
    jump_table.register(OpCode::NIP, nip);
    jump_table.register(OpCode::XDROP, xdrop);
    jump_table.register(OpCode::CLEAR, clear);
    jump_table.register(OpCode::DUP, dup);
    jump_table.register(OpCode::OVER, over);
    jump_table.register(OpCode::PICK, pick);
    jump_table.register(OpCode::TUCK, tuck);
    jump_table.register(OpCode::SWAP, swap);
    jump_table.register(OpCode::ROT, rot);
    jump_table.register(OpCode::ROLL, roll);
    jump_table.register(OpCode::REVERSE3, reverse3);
    jump_table.register(OpCode::REVERSE4, reverse4);
    jump_table.register(OpCode::REVERSEN, reversen);
}

/// Converts a popped integer stack item into a non-negative index from the
/// top of the stack, bounded by the number of items currently below it.
fn pop_index(engine: &mut ExecutionEngine, max_exclusive: usize) -> VmResult<usize> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let n = context
        .pop()?
        .as_int()?
        .to_isize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid stack index"))?;
    if n < 0 || n as usize >= max_exclusive {
        return Err(VmError::invalid_operation_msg("Stack index out of range"));
    }
    Ok(n as usize)
}

/// Implements the DEPTH operation.
fn depth(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let depth = context.evaluation_stack().len();
    context.push(crate::stack_item::StackItem::from_int(depth as i64))?;
    Ok(())
}

/// Implements the DROP operation.
fn drop_top(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    context.pop()?;
    Ok(())
}

/// Implements the NIP operation: removes the second-to-top item.
fn nip(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let len = context.evaluation_stack().len();
    if len < 2 {
        return Err(VmError::stack_underflow_msg(2, len));
    }
    context.evaluation_stack_mut().remove(len - 2)?;
    Ok(())
}

/// Implements the XDROP operation: removes the item n back from the top.
fn xdrop(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let len = engine
        .current_context()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?
        .evaluation_stack()
        .len();
    let n = pop_index(engine, len.saturating_sub(1).max(1))?;
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let stack_len = context.evaluation_stack().len();
    let index = stack_len
        .checked_sub(1 + n)
        .ok_or_else(|| VmError::invalid_operation_msg("Stack index out of range"))?;
    context.evaluation_stack_mut().remove(index)?;
    Ok(())
}

/// Implements the CLEAR operation.
fn clear(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    while !context.evaluation_stack().is_empty() {
        context.pop()?;
    }
    Ok(())
}

/// Implements the DUP operation.
fn dup(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let top = context.peek(0)?;
    context.push(top)?;
    Ok(())
}

/// Implements the OVER operation: copies the second-to-top item to the top.
fn over(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let item = context.peek(1)?;
    context.push(item)?;
    Ok(())
}

/// Implements the PICK operation: copies the item n back to the top.
fn pick(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let len = engine
        .current_context()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?
        .evaluation_stack()
        .len();
    let n = pop_index(engine, len.max(1))?;
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let item = context.peek(n)?;
    context.push(item)?;
    Ok(())
}

/// Implements the TUCK operation: inserts a copy of the top item before the
/// second-to-top item.
fn tuck(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let top = context.peek(0)?;
    let len = context.evaluation_stack().len();
    if len < 2 {
        return Err(VmError::stack_underflow_msg(2, len));
    }
    context
        .evaluation_stack_mut()
        .insert(len - 2, top)?;
    Ok(())
}

/// Implements the SWAP operation: swaps the top two items.
fn swap(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let a = context.pop()?;
    let b = context.pop()?;
    context.push(a)?;
    context.push(b)?;
    Ok(())
}

/// Implements the ROT operation: rotates the top three items to the left.
fn rot(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let c = context.pop()?;
    let b = context.pop()?;
    let a = context.pop()?;
    context.push(b)?;
    context.push(c)?;
    context.push(a)?;
    Ok(())
}

/// Implements the ROLL operation: moves the item n back in the stack to the top.
fn roll(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let len = engine
        .current_context()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?
        .evaluation_stack()
        .len();
    let n = pop_index(engine, len.max(1))?;
    if n == 0 {
        return Ok(());
    }
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let stack_len = context.evaluation_stack().len();
    let index = stack_len
        .checked_sub(1 + n)
        .ok_or_else(|| VmError::invalid_operation_msg("Stack index out of range"))?;
    let item = context.evaluation_stack_mut().remove(index)?;
    context.push(item)?;
    Ok(())
}

/// Reverses the top `count` items of the stack in place.
fn reverse_top(engine: &mut ExecutionEngine, count: usize) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let len = context.evaluation_stack().len();
    if len < count {
        return Err(VmError::stack_underflow_msg(count, len));
    }
    if count < 2 {
        return Ok(());
    }
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(context.pop()?);
    }
    for item in items {
        context.push(item)?;
    }
    Ok(())
}

/// Implements the REVERSE3 operation.
fn reverse3(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    reverse_top(engine, 3)
}

/// Implements the REVERSE4 operation.
fn reverse4(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    reverse_top(engine, 4)
}

/// Implements the REVERSEN operation: pops n, then reverses the top n items.
fn reversen(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let n = context
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid reverse count"))?;
    reverse_top(engine, n)
}
