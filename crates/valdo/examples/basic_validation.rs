use tracing_subscriber::EnvFilter;
use valdo::{
    array, boolean, default_locales, enum_of, int, max, min, min_items, min_len, object, pattern,
    string, validate, Property, Validator,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=valdo=debug shows locale selection and validation outcomes
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let user: Validator = object([
        Property::new("name", string().constrain(min_len(2))),
        Property::new("email", string().constrain(pattern("^[^@]+@[^@]+$")?)),
        Property::new("age", int().constrain(min(0)).constrain(max(150))).optional(),
        Property::new("role", enum_of(["admin", "editor", "viewer"])),
        Property::new("tags", array(string()).constrain(min_items(1))).optional(),
        Property::new("active", boolean()),
    ])
    .into();
    let user = user.title("User").description("An account in the system");

    println!("Schema:");
    println!("{}\n", String::from_utf8(valdo::schema(&user))?);

    let inputs: [&[u8]; 4] = [
        br#"{"name": "Aragorn", "email": "a@gondor.me", "role": "admin", "active": true}"#,
        br#"{"name": "A", "email": "nope", "role": "king", "active": true}"#,
        br#"{"name": "Frodo", "email": "f@shire.me", "role": "viewer", "tags": [], "extra": 1}"#,
        b"",
    ];

    for input in inputs {
        println!("Input: {}", String::from_utf8_lossy(input));
        match validate(&user, input) {
            Ok(()) => println!("  valid"),
            Err(err) => println!("  invalid: {}", err),
        }
    }

    println!("\nIn Dutch:");
    let dutch = default_locales().wrap("nl-BE", user);
    if let Err(err) = validate(&dutch, br#"{"name": 42}"#) {
        println!("  {}", err);
    }

    Ok(())
}
