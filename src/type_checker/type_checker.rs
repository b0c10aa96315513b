use tracing::{debug, warn};

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    types::lattice::{classify, Type},
};

use super::{
    scope::{Binding, Scope},
    type_set::TypeSet,
};

/// Where `return` and `break` payloads go. `None` means there is no
/// enclosing function or loop to receive them.
#[derive(Default)]
pub struct Control<'a> {
    pub returns: Option<&'a mut Vec<TypeSet>>,
    pub breaks: Option<&'a mut Vec<TypeSet>>,
}

impl<'a> Control<'a> {
    pub fn top_level() -> Self {
        Control::default()
    }

    /// Captures breaks into `breaks`, keeping the return target.
    pub fn for_loop<'b>(&'b mut self, breaks: &'b mut Vec<TypeSet>) -> Control<'b> {
        Control {
            returns: self.returns.as_deref_mut(),
            breaks: Some(breaks),
        }
    }

    /// Captures returns into `returns`. Breaks do not cross a function.
    pub fn for_function(returns: &'a mut Vec<TypeSet>) -> Self {
        Control {
            returns: Some(returns),
            breaks: None,
        }
    }
}

fn infer_all(nodes: &mut [Node], scope: &mut Scope, control: &mut Control) -> Result<TypeSet, Error> {
    let mut last = TypeSet::none();
    for node in nodes.iter_mut() {
        last = infer(node, scope, control)?;
    }
    Ok(last)
}

/// Infers the result of `node` in `scope`, records it on the node and
/// returns it.
pub fn infer(node: &mut Node, scope: &mut Scope, control: &mut Control) -> Result<TypeSet, Error> {
    let returns = match &mut node.kind {
        NodeKind::Program(statements) | NodeKind::Block(statements) => {
            let mut inner = scope.child();
            infer_all(statements, &mut inner, control)?
        }

        NodeKind::Binary { left, right, .. } => {
            let left = infer(left, scope, control)?;
            infer(right, scope, control)?;
            // Both sides are checked, the left one decides the result
            left
        }

        NodeKind::Unary { argument, .. } | NodeKind::Update { argument, .. } => {
            infer(argument, scope, control)?
        }

        NodeKind::Identifier(name) => match scope.get(name) {
            Some(Binding::Value(types)) => types.clone(),
            Some(Binding::TypeName(_)) => TypeSet::of(Type::Type, vec![]),
            None => {
                return Err(Error::new(
                    ErrorImpl::VariableNotDeclared {
                        variable: name.clone(),
                    },
                    node.location.clone(),
                ))
            }
        },

        NodeKind::Declaration { type_name, name } => {
            let declared = match scope.get(type_name) {
                Some(Binding::TypeName(ty)) => *ty,
                Some(Binding::Value(_)) => {
                    return Err(Error::new(
                        ErrorImpl::UnknownType {
                            type_: type_name.clone(),
                        },
                        node.location.clone(),
                    ))
                }
                None => {
                    return Err(Error::new(
                        ErrorImpl::VariableNotDeclared {
                            variable: type_name.clone(),
                        },
                        node.location.clone(),
                    ))
                }
            };

            let value = TypeSet::of(declared, vec![]);
            scope.declare(name, Binding::Value(value.clone()));
            TypeSet::of(Type::Maybe, vec![value])
        }

        NodeKind::Assignment { left, right, .. } => {
            infer(left, scope, control)?;
            infer(right, scope, control)?
        }

        NodeKind::Return(value) => {
            let payload = infer(value, scope, control)?;
            match control.returns.as_deref_mut() {
                Some(returns) => returns.push(payload.clone()),
                None => return Err(Error::new(ErrorImpl::ReturnOutsideFunction, node.location.clone())),
            }
            payload
        }

        NodeKind::Break(value) => {
            let payload = infer(value, scope, control)?;
            match control.breaks.as_deref_mut() {
                Some(breaks) => breaks.push(payload.clone()),
                None => return Err(Error::new(ErrorImpl::BreakOutsideLoop, node.location.clone())),
            }
            payload
        }

        NodeKind::Empty => TypeSet::none(),

        NodeKind::Literal(value) => TypeSet::from_types(classify(value)),

        NodeKind::Tuple(items) => {
            let mut parameters = Vec::with_capacity(items.len());
            for item in items.iter_mut() {
                parameters.push(infer(item, scope, control)?);
            }
            TypeSet::of(Type::Tuple, parameters)
        }

        NodeKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            // Names bound by the test are visible to the consequent only
            let mut branch = scope.child();
            infer(test, &mut branch, control)?;
            let mut returns = infer(consequent, &mut branch, control)?;
            match alternate {
                Some(alternate) => returns.union(infer(alternate, &mut scope.child(), control)?),
                None => returns.union(TypeSet::none()),
            }
            returns
        }

        NodeKind::Loop { kind, body, test } => {
            let mut inner = scope.child();
            let mut breaks = vec![];

            // A post-condition test sees the body's declarations, so a block
            // body runs directly in the loop scope instead of its own copy
            let body_returns = match &mut body.kind {
                NodeKind::Block(statements) if kind.tests_after_body() => {
                    let returns = infer_all(statements, &mut inner, &mut control.for_loop(&mut breaks))?;
                    body.returns = returns.clone();
                    returns
                }
                _ => infer(body, &mut inner, &mut control.for_loop(&mut breaks))?,
            };

            if let Some(test) = test {
                let test_scope = if kind.tests_after_body() { &mut inner } else { &mut *scope };
                infer(test, test_scope, control)?;
            }

            let mut returns = TypeSet::of(Type::List, vec![body_returns]);
            for payload in breaks.into_iter().filter(|payload| !payload.is_none()) {
                returns.union(payload);
            }
            returns
        }

        NodeKind::Function {
            capturing,
            parameters,
            body,
        } => {
            let mut inner = if *capturing { scope.child() } else { Scope::global() };
            let mut returns = vec![];

            infer(parameters, &mut inner, control)?;
            let body_returns = infer(body, &mut inner, &mut Control::for_function(&mut returns))?;

            returns.push(body_returns);
            TypeSet::of(Type::Function, vec![returns.into_iter().collect()])
        }

        NodeKind::ParameterList(parameters) => {
            for parameter in parameters.iter_mut() {
                infer(parameter, scope, control)?;
            }
            TypeSet::none()
        }

        NodeKind::Unknown(what) => {
            warn!(node = %what, location = %node.location, "no inference rule for node");
            TypeSet::none()
        }
    };

    node.returns = returns.clone();
    Ok(returns)
}

/// Infers every node of `program`, starting from the global type names.
pub fn type_check(program: &mut Node) -> Result<TypeSet, Error> {
    let mut scope = Scope::global();
    let returns = infer(program, &mut scope, &mut Control::top_level())?;

    debug!(returns = %returns, "type checked program");
    Ok(returns)
}
