//! Diesel schema for task record persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Non-blank task title.
        title -> Text,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Lifecycle status (`OPEN` or `DONE`).
        #[max_length = 16]
        status -> Varchar,
        /// Optimistic-concurrency revision.
        revision -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
