diesel::table! {
    app_slots (name) {
        name -> Text,
        payload -> Text,
        updated_at -> BigInt,
    }
}
