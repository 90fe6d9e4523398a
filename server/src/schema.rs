diesel::table! {
    categories (id) {
        id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Uuid,
        ingredient_id -> Uuid,
        #[max_length = 64]
        amount -> Varchar,
        #[max_length = 64]
        unit -> Varchar,
        note -> Nullable<Varchar>,
    }
}

diesel::table! {
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Uuid,
        tag_id -> Uuid,
    }
}

diesel::table! {
    recipes (id) {
        id -> Uuid,
        user_id -> Uuid,
        category_id -> Nullable<Uuid>,
        #[max_length = 255]
        title -> Varchar,
        description -> Text,
        image -> Nullable<Varchar>,
        prep_time -> Nullable<Int4>,
        cook_time -> Nullable<Int4>,
        servings -> Nullable<Int4>,
        #[max_length = 16]
        difficulty -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    sessions (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[max_length = 255]
        token_hash -> Varchar,
        expires_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    steps (id) {
        id -> Uuid,
        recipe_id -> Uuid,
        step_number -> Int4,
        instruction -> Text,
        image -> Nullable<Varchar>,
    }
}

diesel::table! {
    tags (id) {
        id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        #[max_length = 255]
        username -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        avatar -> Nullable<Varchar>,
        is_admin -> Bool,
        is_content_manager -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(recipes -> categories (category_id));
diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(steps -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    categories,
    ingredients,
    recipe_ingredients,
    recipe_tags,
    recipes,
    sessions,
    steps,
    tags,
    users,
);
