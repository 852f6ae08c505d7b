//! Typed `$jsonSchema` builder

use mongodb::bson::{Bson, Document, doc};

/// BSON type aliases understood by `bsonType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BsonType {
    Object,
    String,
    Decimal,
    Date,
    Bool,
    Int,
    Long,
    Double,
    Array,
}

impl BsonType {
    /// Alias used in `bsonType`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::String => "string",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Array => "array",
        }
    }

    /// Parse a `bsonType` alias
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "object" => Some(Self::Object),
            "string" => Some(Self::String),
            "decimal" => Some(Self::Decimal),
            "date" => Some(Self::Date),
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "double" => Some(Self::Double),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    /// Whether a value has this type
    pub fn matches(&self, value: &Bson) -> bool {
        matches!(
            (self, value),
            (Self::Object, Bson::Document(_))
                | (Self::String, Bson::String(_))
                | (Self::Decimal, Bson::Decimal128(_))
                | (Self::Date, Bson::DateTime(_))
                | (Self::Bool, Bson::Boolean(_))
                | (Self::Int, Bson::Int32(_))
                | (Self::Long, Bson::Int64(_))
                | (Self::Double, Bson::Double(_))
                | (Self::Array, Bson::Array(_))
        )
    }
}

/// Constraint on one property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub bson_type: BsonType,
    pub enum_values: Option<Vec<String>>,
    pub description: String,
}

impl PropertySchema {
    pub fn new(bson_type: BsonType, description: impl Into<String>) -> Self {
        Self {
            bson_type,
            enum_values: None,
            description: description.into(),
        }
    }

    /// Restrict the property to an enumerated set of values
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn to_document(&self) -> Document {
        let mut doc = doc! { "bsonType": self.bson_type.as_str() };
        if let Some(values) = &self.enum_values {
            let values: Vec<Bson> = values.iter().map(|v| Bson::String(v.clone())).collect();
            doc.insert("enum", values);
        }
        doc.insert("description", self.description.as_str());
        doc
    }
}

/// Object schema with required fields and per-property constraints
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonSchema {
    pub required: Vec<String>,
    pub properties: Vec<(String, PropertySchema)>,
}

impl JsonSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property; `required` adds it to the required list
    pub fn property(
        mut self,
        name: impl Into<String>,
        required: bool,
        schema: PropertySchema,
    ) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.push((name, schema));
        self
    }

    /// Look up a property constraint
    pub fn get(&self, name: &str) -> Option<&PropertySchema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    /// The schema document (`bsonType`, `required`, `properties`)
    pub fn to_document(&self) -> Document {
        let required: Vec<Bson> = self
            .required
            .iter()
            .map(|field| Bson::String(field.clone()))
            .collect();
        let mut properties = Document::new();
        for (name, schema) in &self.properties {
            properties.insert(name.clone(), schema.to_document());
        }
        doc! {
            "bsonType": BsonType::Object.as_str(),
            "required": required,
            "properties": properties,
        }
    }

    /// Collection validator wrapping the schema in `$jsonSchema`
    pub fn to_validator(&self) -> Document {
        doc! { "$jsonSchema": self.to_document() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_document_shape() {
        let schema = JsonSchema::new()
            .property(
                "tipoMovimiento",
                true,
                PropertySchema::new(BsonType::String, "Tipo de movimiento").one_of(["DEBITO", "CREDITO"]),
            )
            .property("monto", false, PropertySchema::new(BsonType::Decimal, "Monto"));

        let validator = schema.to_validator();
        let inner = validator.get_document("$jsonSchema").unwrap();
        assert_eq!(inner.get_str("bsonType").unwrap(), "object");
        assert_eq!(
            inner.get_array("required").unwrap(),
            &vec![Bson::String("tipoMovimiento".into())]
        );

        let props = inner.get_document("properties").unwrap();
        let tipo = props.get_document("tipoMovimiento").unwrap();
        assert_eq!(tipo.get_str("bsonType").unwrap(), "string");
        assert_eq!(tipo.get_array("enum").unwrap().len(), 2);
        assert_eq!(
            props.get_document("monto").unwrap().get_str("bsonType").unwrap(),
            "decimal"
        );
    }

    #[test]
    fn test_bson_type_aliases() {
        for ty in [BsonType::Object, BsonType::Decimal, BsonType::Date, BsonType::Long] {
            assert_eq!(BsonType::from_alias(ty.as_str()), Some(ty));
        }
        assert_eq!(BsonType::from_alias("number"), None);
        assert!(BsonType::String.matches(&Bson::String("x".into())));
        assert!(!BsonType::Decimal.matches(&Bson::Double(1.5)));
    }
}
