#![cfg(feature = "serde")]
/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use serde::ser::*;

use crate::options::BufferOptions;

impl Serialize for BufferOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("BufferOptions", 7)?;
        state.serialize_field("max_dimension", &self.get_max_dimension())?;
        state.serialize_field("max_area", &self.get_max_area())?;
        state.serialize_field("max_components", &self.get_max_components())?;
        state.serialize_field("max_data_size", &self.get_max_data_size())?;
        state.serialize_field("max_alloc_size", &self.get_max_alloc_size())?;
        state.serialize_field("size_override", &self.get_size_override())?;
        state.serialize_field("temp_buffer_size", &self.get_temp_buffer_size())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::options::BufferOptions;

    #[test]
    fn options_serialize_as_struct() {
        let options = BufferOptions::default().set_max_dimension(512);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"max_dimension\":512"));
        assert!(json.contains("\"size_override\":false"));
    }
}
