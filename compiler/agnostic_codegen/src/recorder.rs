//! Recording builder.
//!
//! A [`Program`] accepts every [`Builder`] call and stores it as data instead
//! of emitting text. The recorded program can then be replayed into any
//! number of backends with [`crate::replay`].

use agnostic_diagnostic::{CodegenError, Result};
use agnostic_ir::{BlockId, Field, Program, Stmt, TypeDesc, Value};

use crate::contract::Builder;

fn push(program: &mut Program, block: BlockId, stmt: Stmt) -> Result<()> {
    program
        .block_mut(block)
        .ok_or(CodegenError::InvalidBlock { block })?
        .push(stmt);
    Ok(())
}

fn check(program: &Program, block: BlockId) -> Result<()> {
    program
        .block(block)
        .map(|_| ())
        .ok_or(CodegenError::InvalidBlock { block })
}

impl Builder for Program {
    fn model(&mut self, name: &str, fields: &[Field]) -> Result<()> {
        self.add_model(name, fields.to_vec());
        Ok(())
    }

    fn enumeration(&mut self, name: &str, values: &[&str]) -> Result<()> {
        self.add_enum(name, values.iter().map(|v| (*v).to_owned()).collect());
        Ok(())
    }

    fn method(&mut self, model: &str, name: &str, params: &[Field]) -> Result<BlockId> {
        Ok(self.add_method(model, name, params.to_vec(), None))
    }

    fn return_method(
        &mut self,
        model: &str,
        name: &str,
        returns: &TypeDesc,
        params: &[Field],
    ) -> Result<BlockId> {
        Ok(self.add_method(model, name, params.to_vec(), Some(returns.clone())))
    }

    fn assign(&mut self, block: BlockId, target: &Value, source: &Value) -> Result<()> {
        let stmt = Stmt::Assign {
            target: target.clone(),
            source: source.clone(),
        };
        push(self, block, stmt)
    }

    fn declare(&mut self, block: BlockId, name: &str, value: &Value) -> Result<()> {
        let stmt = Stmt::Declare {
            name: name.to_owned(),
            value: value.clone(),
        };
        push(self, block, stmt)
    }

    fn append_value(&mut self, block: BlockId, array: &Value, value: &Value) -> Result<()> {
        let stmt = Stmt::AppendValue {
            array: array.clone(),
            value: value.clone(),
        };
        push(self, block, stmt)
    }

    fn append_array(&mut self, block: BlockId, array: &Value, values: &Value) -> Result<()> {
        let stmt = Stmt::AppendArray {
            array: array.clone(),
            values: values.clone(),
        };
        push(self, block, stmt)
    }

    fn remove_value(&mut self, block: BlockId, array: &Value, index: &Value) -> Result<()> {
        let stmt = Stmt::RemoveValue {
            array: array.clone(),
            index: index.clone(),
        };
        push(self, block, stmt)
    }

    fn map_put(&mut self, block: BlockId, map: &Value, key: &Value, value: &Value) -> Result<()> {
        let stmt = Stmt::MapPut {
            map: map.clone(),
            key: key.clone(),
            value: value.clone(),
        };
        push(self, block, stmt)
    }

    fn map_delete(&mut self, block: BlockId, map: &Value, key: &Value) -> Result<()> {
        let stmt = Stmt::MapDelete {
            map: map.clone(),
            key: key.clone(),
        };
        push(self, block, stmt)
    }

    fn for_each(
        &mut self,
        block: BlockId,
        array: &Value,
        index_name: &str,
        value_name: &str,
    ) -> Result<BlockId> {
        check(self, block)?;
        let body = self.new_block();
        let stmt = Stmt::ForEach {
            array: array.clone(),
            index_name: index_name.to_owned(),
            value_name: value_name.to_owned(),
            body,
        };
        push(self, block, stmt)?;
        Ok(body)
    }

    fn if_then(&mut self, block: BlockId, cond: &Value) -> Result<BlockId> {
        check(self, block)?;
        let body = self.new_block();
        push(
            self,
            block,
            Stmt::If {
                cond: cond.clone(),
                body,
            },
        )?;
        Ok(body)
    }

    fn if_else(&mut self, block: BlockId, cond: &Value) -> Result<(BlockId, BlockId)> {
        check(self, block)?;
        let then_body = self.new_block();
        let else_body = self.new_block();
        push(
            self,
            block,
            Stmt::IfElse {
                cond: cond.clone(),
                then_body,
                else_body,
            },
        )?;
        Ok((then_body, else_body))
    }

    fn return_value(&mut self, block: BlockId, value: &Value) -> Result<()> {
        push(self, block, Stmt::Return(value.clone()))
    }
}
