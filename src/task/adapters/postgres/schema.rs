//! Diesel schema for task persistence.

diesel::table! {
    /// Installation task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Job name.
        name -> Text,
        /// Customer or site owner.
        owner_name -> Text,
        /// Task date.
        task_date -> Date,
        /// Installation status.
        #[max_length = 20]
        status -> Varchar,
        /// Free-text notes.
        comments -> Nullable<Text>,
        /// Site coordinates as `{"lat", "lng"}`.
        location -> Nullable<Jsonb>,
        /// Amount received, in minor units.
        amount_received -> Int8,
        /// Remaining amount, in minor units.
        remaining_amount -> Int8,
        /// Total amount, in minor units.
        total_amount -> Int8,
        /// Submission status.
        #[max_length = 20]
        submission_status -> Varchar,
        /// Author.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Image references attached to tasks.
    task_images (id) {
        /// Reference identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Public image URL.
        image_url -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Insertion sequence.
        seq -> Int8,
    }
}

diesel::table! {
    /// Append-only field change history.
    task_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Changed field name.
        #[max_length = 50]
        field_name -> Varchar,
        /// Value before the edit.
        old_value -> Nullable<Text>,
        /// Value after the edit.
        new_value -> Nullable<Text>,
        /// Editor.
        changed_by -> Uuid,
        /// Reason supplied with the edit.
        change_reason -> Nullable<Text>,
        /// Recording timestamp.
        created_at -> Timestamptz,
        /// Insertion sequence.
        seq -> Int8,
    }
}

diesel::joinable!(task_images -> tasks (task_id));
diesel::joinable!(task_history -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_images, task_history);
