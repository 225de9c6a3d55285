//! Diesel schema for delivery task persistence.

diesel::table! {
    /// Delivery requests with their intake coordinate snapshot.
    orders (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Destination table label.
        #[max_length = 64]
        table_number -> Varchar,
        /// Goal x coordinate snapshot.
        goal_x -> Float8,
        /// Goal y coordinate snapshot.
        goal_y -> Float8,
        /// Goal heading snapshot.
        goal_yaw -> Float8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Robot-facing goals, one per order.
    navigation_goals (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Owning order; unique and cascades on delete.
        order_id -> Int8,
        /// Lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Goal x coordinate.
        goal_x -> Float8,
        /// Goal y coordinate.
        goal_y -> Float8,
        /// Goal heading.
        goal_yaw -> Float8,
        /// Spatial reference frame.
        #[max_length = 64]
        frame_id -> Varchar,
        /// Opaque robot telemetry.
        meta -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(navigation_goals -> orders (order_id));
diesel::allow_tables_to_appear_in_same_query!(orders, navigation_goals);
