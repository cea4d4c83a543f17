//! Type Resolver: reduces structural types to descriptors and reconciles
//! the docstring's declared type with the signature's.
//!
//! Reduction rules:
//!
//! - list-like generics become `Container`, one level deep only
//! - a union whose only non-null arm is a container, or that has a single
//!   non-null arm, becomes that arm
//! - any other union holding a container or record is rejected
//! - names are looked up in the namespace (enums, records, classes)

use super::{parse_type_expr, Builtin, Namespace, TypeDef, TypeDescriptor, TypeHint};
use crate::error::{Error, Result};

/// Reduce a structural type to its canonical descriptor.
pub fn reduce(hint: &TypeHint, ns: &dyn Namespace) -> Result<TypeDescriptor> {
    match hint {
        TypeHint::Named(name) => match ns.resolve(name) {
            None => Err(Error::UnresolvedName(name.clone())),
            Some(TypeDef::Builtin(Builtin::List)) => Err(Error::BareList),
            Some(TypeDef::Builtin(builtin)) => Ok(TypeDescriptor::scalar(builtin.name())),
            Some(TypeDef::Enum { name, members }) => {
                Ok(TypeDescriptor::Enumerated { name, members })
            }
            Some(TypeDef::Record { name, fields }) => {
                let fields = fields
                    .iter()
                    .map(|(field, hint)| Ok((field.clone(), element(hint, hint, ns)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeDescriptor::Record { name, fields })
            }
            Some(TypeDef::Class { name, .. }) => Ok(TypeDescriptor::Scalar(name)),
        },
        TypeHint::NoneType => Ok(TypeDescriptor::scalar(Builtin::NoneType.name())),
        TypeHint::List(elem) => Ok(TypeDescriptor::Container(Box::new(element(
            elem, hint, ns,
        )?))),
        TypeHint::Tuple(elems) => elems
            .iter()
            .map(|elem| element(elem, hint, ns))
            .collect::<Result<Vec<_>>>()
            .map(TypeDescriptor::FixedTuple),
        TypeHint::VarTuple(elem) => Ok(TypeDescriptor::VariadicTuple(Box::new(element(
            elem, hint, ns,
        )?))),
        TypeHint::Literal(values) => Ok(TypeDescriptor::Choice(values.clone())),
        TypeHint::Union(members) => union(members, hint, ns),
    }
}

/// A container element: anything but another container.
fn element(elem: &TypeHint, outer: &TypeHint, ns: &dyn Namespace) -> Result<TypeDescriptor> {
    let desc = reduce(elem, ns)?;
    if desc.is_container() {
        return Err(Error::UnsupportedContainer(format!(
            "nested container type: {}",
            outer
        )));
    }
    Ok(desc)
}

fn union(members: &[TypeHint], hint: &TypeHint, ns: &dyn Namespace) -> Result<TypeDescriptor> {
    let mut reduced: Vec<TypeDescriptor> = Vec::with_capacity(members.len());
    for member in members {
        let desc = reduce(member, ns)?;
        if !reduced.contains(&desc) {
            reduced.push(desc);
        }
    }
    let has_none = reduced.iter().any(TypeDescriptor::is_none);
    let mut non_none: Vec<TypeDescriptor> =
        reduced.iter().filter(|d| !d.is_none()).cloned().collect();

    if reduced.iter().any(TypeDescriptor::is_container) {
        if non_none.len() == 1 {
            return Ok(non_none.remove(0));
        }
        return Err(Error::UnsupportedContainer(format!(
            "union including container type: {}",
            hint
        )));
    }
    if (has_none && non_none.len() == 1) || reduced.len() == 1 {
        return Ok(non_none.pop().unwrap_or_else(|| reduced.remove(0)));
    }
    Ok(TypeDescriptor::Union(reduced))
}

/// Settle the type of one parameter from its docstring token and its
/// signature hint. Both present: they must reduce to the same descriptor,
/// and the hint's union member order wins.
pub fn resolve_param_type(
    name: &str,
    doc_token: Option<&str>,
    hint: Option<&TypeHint>,
    ns: &dyn Namespace,
) -> Result<TypeDescriptor> {
    let from_doc = doc_token
        .map(|token| parse_type_expr(token).and_then(|parsed| reduce(&parsed, ns)))
        .transpose()?;
    let from_hint = hint.map(|hint| reduce(hint, ns)).transpose()?;

    match (from_doc, from_hint) {
        (Some(doc), Some(sig)) => {
            if doc.same_as(&sig) {
                Ok(sig)
            } else {
                Err(Error::TypeConflict {
                    param: name.to_string(),
                    doc: doc_token.unwrap_or_default().to_string(),
                    hint: hint.map(|h| h.to_string()).unwrap_or_default(),
                })
            }
        }
        (Some(desc), None) | (None, Some(desc)) => Ok(desc),
        (None, None) => Err(Error::MissingType(name.to_string())),
    }
}
