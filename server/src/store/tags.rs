use diesel::prelude::*;

use crate::models::Tag;
use crate::schema::tags;

/// All tags, ordered by name.
pub fn list_all(conn: &mut PgConnection) -> QueryResult<Vec<Tag>> {
    tags::table
        .select(Tag::as_select())
        .order(tags::name.asc())
        .load(conn)
}
