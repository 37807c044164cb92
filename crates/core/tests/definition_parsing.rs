use springwell_core::naming::{pluralize, NameVariants};
use springwell_core::{parse_fields, parse_relationships, CoreError, RelationshipKind};

#[test]
fn mixed_definitions_parse_in_order() {
    let fields = parse_fields("  email:String   name:String:nullable\tage:Integer ").unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[1].name, "name");
    assert!(fields[1].nullable);
    assert!(!fields[2].nullable);

    let relationships =
        parse_relationships("manyToOne:author:User oneToMany:comments:Comment manyToMany:tags:Tag")
            .unwrap();
    let kinds: Vec<_> = relationships.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RelationshipKind::ManyToOne,
            RelationshipKind::OneToMany,
            RelationshipKind::ManyToMany
        ]
    );
}

#[test]
fn first_bad_token_fails_the_whole_spec() {
    let err = parse_fields("title:String :String body").unwrap_err();
    // ":String" has two parts and is accepted with an empty name
    assert!(matches!(err, CoreError::MalformedFieldToken { token } if token == "body"));

    let err = parse_relationships("manyToOne:author:User belongsTo:post:Post").unwrap_err();
    assert!(err.to_string().contains("belongsTo"));
}

#[test]
fn one_name_drives_every_variant() {
    let names = NameVariants::new("blog-post");
    assert_eq!(names.pascal, "BlogPost");
    assert_eq!(names.camel, "blogPost");
    assert_eq!(names.snake, "blog_post");
    assert_eq!(names.kebab, "blog-post");
    assert_eq!(names.plural_snake(), "blog_posts");
    assert_eq!(names.plural_kebab(), "blog-posts");
}

#[test]
fn pluralization_rules() {
    assert_eq!(pluralize("category"), "categories");
    assert_eq!(pluralize("day"), "days");
    assert_eq!(pluralize("box"), "boxes");
    assert_eq!(pluralize("address"), "addresses");
    assert_eq!(pluralize("match"), "matches");
    assert_eq!(pluralize("wish"), "wishes");
    assert_eq!(pluralize("quiz"), "quizes");
    assert_eq!(pluralize("order"), "orders");
}
