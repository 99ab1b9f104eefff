//! Console, fichiers, import.
//!
//! Les échecs d'E/S sont convertis sur place : `photon_read` → `""`,
//! `photon_write` → `false`.

use std::fs;

use super::{arg, text_of};
use crate::ctx::ExecCtx;
use crate::registry::{Arity, BuiltinFlags, BuiltinFn, Registry};
use crate::value::Value;

pub(super) fn install(reg: &mut Registry) {
    let io = BuiltinFlags::IO;
    reg.register_all(&[
        ("photon_print", Arity::Fixed(1), io, photon_print as BuiltinFn),
        ("photon_input", Arity::Fixed(1), io, photon_input as BuiltinFn),
        ("photon_read",  Arity::Fixed(1), io, photon_read as BuiltinFn),
        ("photon_write", Arity::Fixed(2), io, photon_write as BuiltinFn),
        ("__import__",   Arity::Fixed(1), BuiltinFlags::empty(), import as BuiltinFn),
    ]);
}

fn photon_print(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    ctx.emit(&arg(args, 0).to_display());
    Value::Nil
}

fn photon_input(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    let prompt = match arg(args, 0) {
        Value::Nil => String::new(),
        other => text_of(other),
    };
    Value::Str(ctx.prompt_line(&prompt).unwrap_or_default())
}

fn photon_read(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let Some(path) = arg(args, 0).as_str() else {
        return Value::Str(String::new());
    };
    match fs::read_to_string(path) {
        Ok(text) => Value::Str(text),
        Err(e) => {
            tracing::debug!(path, error = %e, "photon_read: lecture impossible");
            Value::Str(String::new())
        }
    }
}

fn photon_write(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let Some(path) = arg(args, 0).as_str() else {
        return Value::Bool(false);
    };
    let data = text_of(arg(args, 1));
    match fs::write(path, data.as_bytes()) {
        Ok(()) => Value::Bool(true),
        Err(e) => {
            tracing::debug!(path, error = %e, "photon_write: écriture impossible");
            Value::Bool(false)
        }
    }
}

// Crochet d'import : les modules ne sont pas résolus ici.
fn import(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    tracing::debug!(module = %arg(args, 0), "__import__ ignoré");
    Value::Nil
}
