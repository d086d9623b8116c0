use std::collections::{HashMap, HashSet};

use async_graphql::dynamic::{
    self, Field, FieldFuture, FieldValue, InputValue, Object, Scalar, Schema, TypeRef,
};
use async_graphql::parser::parse_schema;
use async_graphql::parser::types::{BaseType, FieldDefinition, Type, TypeKind, TypeSystemDefinition};

use super::context::{ANONYMOUS, RequestContext};
use super::resolvers::{Arguments, Resolver, property};
use crate::datamodel::Record;
use crate::error::ConfigError;

type FieldKey = (String, String);

/// Resolvers keyed by `(type name, field name)`.
///
/// Fields without an entry fall back to [`property`] when the schema is built.
#[derive(Debug, Default)]
pub struct Bindings {
    resolvers: HashMap<FieldKey, Resolver>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(
        &mut self,
        type_name: &str,
        field_name: &str,
        resolver: Resolver,
    ) -> Result<&mut Self, ConfigError> {
        let key = (type_name.to_owned(), field_name.to_owned());
        if self.resolvers.contains_key(&key) {
            return Err(ConfigError::DuplicateBinding {
                type_name: key.0,
                field_name: key.1,
            });
        }
        self.resolvers.insert(key, resolver);
        Ok(self)
    }

    pub fn get(&self, type_name: &str, field_name: &str) -> Option<&Resolver> {
        self.resolvers.get(&(type_name.to_owned(), field_name.to_owned()))
    }
}

/// Parses `sdl` and turns it into an executable schema, wiring every field
/// either to its bound resolver or to the property default.
pub fn build_schema(sdl: &str, bindings: &Bindings) -> Result<Schema, ConfigError> {
    let document = parse_schema(sdl).map_err(|err| ConfigError::Parse(err.to_string()))?;

    let mut query_root = String::from("Query");
    let mut types: Vec<dynamic::Type> = Vec::new();
    let mut type_names = HashSet::new();
    let mut declared: HashSet<FieldKey> = HashSet::new();

    for definition in document.definitions {
        match definition {
            TypeSystemDefinition::Schema(schema) => {
                let schema = schema.node;
                if schema.extend || schema.mutation.is_some() || schema.subscription.is_some() {
                    return Err(ConfigError::UnsupportedDefinition(
                        "only a query root is supported".into(),
                    ));
                }
                if let Some(query) = schema.query {
                    query_root = query.node.to_string();
                }
            }
            TypeSystemDefinition::Type(definition) => {
                let definition = definition.node;
                let type_name = definition.name.node.to_string();
                if definition.extend {
                    return Err(ConfigError::UnsupportedDefinition(format!(
                        "extension of type `{type_name}`"
                    )));
                }
                if !type_names.insert(type_name.clone()) {
                    return Err(ConfigError::DuplicateType(type_name));
                }

                match definition.kind {
                    TypeKind::Object(object_type) => {
                        let mut object = Object::new(&type_name);
                        if let Some(description) = definition.description {
                            object = object.description(description.node);
                        }
                        for field in object_type.fields {
                            let field = field.node;
                            let key = (type_name.clone(), field.name.node.to_string());
                            if !declared.insert(key) {
                                return Err(ConfigError::Schema(format!(
                                    "field `{type_name}.{}` is declared twice",
                                    field.name.node
                                )));
                            }
                            object = object.field(build_field(&type_name, field, bindings));
                        }
                        types.push(object.into());
                    }
                    TypeKind::Scalar => types.push(Scalar::new(&type_name).into()),
                    _ => {
                        return Err(ConfigError::UnsupportedDefinition(format!(
                            "type `{type_name}` is not an object or scalar"
                        )));
                    }
                }
            }
            TypeSystemDefinition::Directive(directive) => {
                return Err(ConfigError::UnsupportedDefinition(format!(
                    "directive `@{}`",
                    directive.node.name.node
                )));
            }
        }
    }

    // report the alphabetically first offender so the error is stable
    if let Some((type_name, field_name)) = bindings
        .resolvers
        .keys()
        .filter(|key| !declared.contains(*key))
        .min()
        .cloned()
    {
        return Err(ConfigError::UnknownField {
            type_name,
            field_name,
        });
    }

    let mut builder = Schema::build(&query_root, None, None);
    for ty in types {
        builder = builder.register(ty);
    }
    builder.finish().map_err(|err| ConfigError::Schema(err.to_string()))
}

fn build_field(type_name: &str, definition: FieldDefinition, bindings: &Bindings) -> Field {
    let field_name = definition.name.node.to_string();
    let resolver = bindings.get(type_name, &field_name).copied();
    tracing::debug!(
        type_name,
        field = %field_name,
        bound = resolver.is_some(),
        "binding field"
    );

    let argument_names: Vec<String> = definition
        .arguments
        .iter()
        .map(|argument| argument.node.name.node.to_string())
        .collect();

    let nullable = definition.ty.node.nullable;
    let property_name = field_name.clone();
    let mut field = Field::new(
        field_name,
        type_ref(&definition.ty.node),
        move |ctx| {
            let resolution = {
                let source = ctx.parent_value.downcast_ref::<Record>();
                match resolver {
                    Some(resolver) => {
                        let args: Arguments = argument_names
                            .iter()
                            .filter_map(|name| {
                                ctx.args
                                    .get(name)
                                    .map(|value| (name.as_str(), value.as_value().clone()))
                            })
                            .collect();
                        let context = ctx.data_opt::<RequestContext>().unwrap_or(&ANONYMOUS);
                        resolver.resolve(&args, source, context)
                    }
                    None => property(source, &property_name),
                }
            };

            let resolution = match resolution {
                Ok(resolved) => Ok(resolved.map(FieldValue::from)),
                // a nullable field stays in `data` as null, with the error reported beside it
                Err(err) if nullable => {
                    let error = async_graphql::Error::new(err.to_string());
                    ctx.add_error(ctx.set_error_path(error.into_server_error(ctx.item.pos)));
                    Ok(None)
                }
                Err(err) => Err(async_graphql::Error::new(err.to_string())),
            };
            FieldFuture::new(async move { resolution })
        },
    );

    if let Some(description) = definition.description {
        field = field.description(description.node);
    }
    for argument in definition.arguments {
        let argument = argument.node;
        let mut input =
            InputValue::new(argument.name.node.to_string(), type_ref(&argument.ty.node));
        if let Some(description) = argument.description {
            input = input.description(description.node);
        }
        if let Some(default_value) = argument.default_value {
            input = input.default_value(default_value.node);
        }
        field = field.argument(input);
    }
    field
}

fn type_ref(ty: &Type) -> TypeRef {
    let base = match &ty.base {
        BaseType::Named(name) => TypeRef::named(name.as_str()),
        BaseType::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
    };
    if ty.nullable {
        base
    } else {
        TypeRef::NonNull(Box::new(base))
    }
}
