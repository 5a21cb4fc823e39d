diesel::table! {
    submissions (id) {
        id -> Integer,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        date -> Date,
        occupation -> Text,
    }
}
