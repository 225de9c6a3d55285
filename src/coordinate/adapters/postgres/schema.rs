//! Diesel schema for coordinate registry persistence.

diesel::table! {
    /// Master table-number to goal-pose mapping.
    table_coordinates (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Unique table label.
        #[max_length = 64]
        table_number -> Varchar,
        /// Goal x coordinate.
        goal_x -> Float8,
        /// Goal y coordinate.
        goal_y -> Float8,
        /// Goal heading in radians.
        goal_yaw -> Float8,
    }
}
