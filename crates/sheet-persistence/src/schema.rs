//! Esquema Diesel (escrito a mano). Reemplazable con `diesel print-schema`.

diesel::table! {
    file_metadata (id) {
        id -> Uuid,
        created_date -> Timestamptz,
        generation_status -> Nullable<Text>,
        document -> Jsonb,
    }
}
