use crate::PixelSpan;

impl ::serde::Serialize for PixelSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ::serde::Serializer,
    {
        use ::serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.min())?;
        tuple.serialize_element(&self.max())?;
        tuple.end()
    }
}

impl<'de> ::serde::Deserialize<'de> for PixelSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: ::serde::Deserializer<'de>,
    {
        struct PixelSpanVisitor;

        impl<'de> ::serde::de::Visitor<'de> for PixelSpanVisitor {
            type Value = PixelSpan;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("an array of 2 numbers, or a map with min and max fields")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: ::serde::de::SeqAccess<'de>,
            {
                let min = seq
                    .next_element::<i32>()?
                    .ok_or_else(|| ::serde::de::Error::invalid_length(0, &self))?;

                let max = seq
                    .next_element::<i32>()?
                    .ok_or_else(|| ::serde::de::Error::invalid_length(1, &self))?;

                Ok(PixelSpan::new(min, max))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut min = None;
                let mut max = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "min" => {
                            if min.is_some() {
                                return Err(serde::de::Error::duplicate_field("min"));
                            }
                            min = Some(map.next_value::<i32>()?);
                        }
                        "max" => {
                            if max.is_some() {
                                return Err(serde::de::Error::duplicate_field("max"));
                            }
                            max = Some(map.next_value::<i32>()?);
                        }
                        _ => {
                            return Err(serde::de::Error::unknown_field(&key, &["min", "max"]));
                        }
                    }
                }

                Ok(PixelSpan::new(
                    min.ok_or_else(|| serde::de::Error::missing_field("min"))?,
                    max.ok_or_else(|| serde::de::Error::missing_field("max"))?,
                ))
            }
        }

        deserializer.deserialize_any(PixelSpanVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn deserialize_tuple_form() {
        let json = json!([3, 9]);
        let span = PixelSpan::deserialize(&json).unwrap();
        assert_eq!(span, PixelSpan::new(3, 9));
    }

    #[test]
    fn deserialize_named_form() {
        let json = json!({ "min": 3, "max": 9 });
        let span = PixelSpan::deserialize(&json).unwrap();
        assert_eq!(span, PixelSpan::new(3, 9));
        let json_text = serde_json::to_string(&span).unwrap();
        assert_eq!(json_text, "[3,9]");
    }

    #[test]
    fn deserialize_rejects_unknown_field() {
        let json = json!({ "min": 3, "max": 9, "mid": 6 });
        assert!(PixelSpan::deserialize(&json).is_err());
    }

    #[test]
    fn deserialize_rejects_short_tuple() {
        let json = json!([3]);
        assert!(PixelSpan::deserialize(&json).is_err());
    }
}
