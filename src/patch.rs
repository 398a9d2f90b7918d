//! Partial-update documents
//!
//! A patch is a list of operations applied to a serialized snapshot of the
//! update DTO, never to the stored entity directly. Operations target
//! top-level DTO fields through single-segment paths (`/title`). The whole
//! document is applied to the snapshot before anything is validated or
//! persisted, so a failing document leaves the stored entity untouched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FieldViolation;

/// Operation kinds accepted in a patch document
///
/// `Move`, `Copy` and `Test` parse so a document using them is reported as a
/// field violation rather than rejected as malformed JSON.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatchOpKind {
    Add,
    Replace,
    Remove,
    Move,
    Copy,
    Test,
}

impl PatchOpKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Remove => "remove",
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Test => "test",
        }
    }
}

/// One operation in a patch document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatchOp {
    pub op: PatchOpKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOp {
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOpKind::Replace,
            path: path.into(),
            value: Some(value),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOpKind::Remove,
            path: path.into(),
            value: None,
        }
    }
}

/// Apply a patch document to a DTO snapshot
///
/// On success returns the merged DTO, ready for validation. On failure
/// returns every violation found in the document; an empty document succeeds
/// and returns the snapshot unchanged.
pub fn apply<P>(snapshot: &P, ops: &[PatchOp]) -> Result<P, Vec<FieldViolation>>
where
    P: Serialize + DeserializeOwned,
{
    let mut doc = match serde_json::to_value(snapshot) {
        Ok(Value::Object(map)) => map,
        _ => {
            return Err(vec![FieldViolation::new(
                "body",
                "type",
                "patch target must be an object",
            )])
        }
    };

    let mut violations = Vec::new();
    for op in ops {
        apply_one(&mut doc, op, &mut violations);
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    serde_json::from_value(Value::Object(doc)).map_err(|err| {
        vec![FieldViolation::new(
            "body",
            "type",
            format!("patched value has the wrong type: {err}"),
        )]
    })
}

fn apply_one(doc: &mut Map<String, Value>, op: &PatchOp, violations: &mut Vec<FieldViolation>) {
    let Some(field) = parse_path(&op.path) else {
        violations.push(FieldViolation::new(
            op.path.clone(),
            "invalid_path",
            format!("path {:?} must name a top-level field like \"/title\"", op.path),
        ));
        return;
    };

    if !doc.contains_key(field) {
        violations.push(FieldViolation::new(
            field,
            "unknown_path",
            format!("field {field:?} does not exist"),
        ));
        return;
    }

    match op.op {
        PatchOpKind::Add | PatchOpKind::Replace => match &op.value {
            Some(value) => {
                doc.insert(field.to_string(), value.clone());
            }
            None => violations.push(FieldViolation::new(
                field,
                "missing_value",
                format!("{} operation requires a value", op.op.as_str()),
            )),
        },
        PatchOpKind::Remove => {
            // Clearing, not deleting: the merged document must keep the
            // full DTO shape.
            doc.insert(field.to_string(), Value::Null);
        }
        PatchOpKind::Move | PatchOpKind::Copy | PatchOpKind::Test => {
            violations.push(FieldViolation::new(
                field,
                "unsupported_op",
                format!("operation {:?} is not supported", op.op.as_str()),
            ));
        }
    }
}

/// Accepts exactly one segment: `/field`
fn parse_path(path: &str) -> Option<&str> {
    let field = path.strip_prefix('/')?;
    if field.is_empty() || field.contains('/') {
        return None;
    }
    Some(field)
}
