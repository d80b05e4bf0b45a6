#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use agnostic_diagnostic::ErrorCode;
use agnostic_ir::{MapEntry, Operator};
use pretty_assertions::assert_eq;

fn counter(go: &mut GoBackend) -> Result<()> {
    go.model(
        "Counter",
        &[
            Field::new("count", TypeDesc::INT64),
            Field::new("ratio", TypeDesc::FLOAT32),
            Field::new("tags", TypeDesc::array(TypeDesc::STRING)),
        ],
    )
}

#[test]
fn test_struct_and_method() -> Result<()> {
    let mut go = GoBackend::new("counter");
    counter(&mut go)?;
    let body = go.return_method(
        "Counter",
        "Add",
        &TypeDesc::INT64,
        &[Field::new("by", TypeDesc::INT64)],
    )?;
    go.assign(
        body,
        &Value::own_field("count"),
        &Value::combined(Value::own_field("count"), Operator::Add, Value::id("by")),
    )?;
    go.return_value(body, &Value::own_field("count"))?;

    assert_eq!(
        go.render()?,
        "package counter\n\
         \n\
         type Counter struct {\n\
         \tcount int64\n\
         \tratio float32\n\
         \ttags []string\n\
         }\n\
         \n\
         func (c *Counter) Add(by int64) int64 {\n\
         \tc.count = c.count + by\n\
         \treturn c.count\n\
         }\n"
    );
    Ok(())
}

#[test]
fn test_method_order_is_call_order() -> Result<()> {
    let mut go = GoBackend::new("counter");
    go.method("Counter", "First", &[])?;
    counter(&mut go)?;
    go.method("Counter", "Second", &[])?;

    let text = go.render()?;
    let first = text.find("func (c *Counter) First() {").unwrap();
    let model = text.find("type Counter struct {").unwrap();
    let second = text.find("func (c *Counter) Second() {").unwrap();
    assert!(first < model && model < second);
    Ok(())
}

#[test]
fn test_broken_reference_at_render() -> Result<()> {
    let mut go = GoBackend::new("ghost");
    go.method("Ghost", "Haunt", &[])?;
    let err = go.render().unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1002);
    Ok(())
}

#[test]
fn test_enum_uses_iota() -> Result<()> {
    let mut go = GoBackend::new("colors");
    go.enumeration("Color", &["Red", "Green"])?;
    assert_eq!(
        go.render()?,
        "package colors\n\
         \n\
         type Color int\n\
         \n\
         const (\n\
         \tColor_Red Color = iota\n\
         \tColor_Green\n\
         )\n"
    );
    Ok(())
}

#[test]
fn test_collection_statements() -> Result<()> {
    let mut go = GoBackend::new("counter");
    counter(&mut go)?;
    let body = go.method("Counter", "Edit", &[Field::new("i", TypeDesc::INT)])?;
    let tags = Value::own_field("tags");
    go.append_value(body, &tags, &Value::string("a"))?;
    go.append_array(
        body,
        &tags,
        &Value::array(TypeDesc::STRING, vec![Value::string("b"), Value::string("c")]),
    )?;
    go.remove_value(body, &tags, &Value::combined(Value::id("i"), Operator::Sub, Value::Int(1)))?;
    go.declare(
        body,
        "m",
        &Value::map(
            TypeDesc::STRING,
            TypeDesc::INT,
            vec![
                MapEntry::new(Value::string("z"), Value::Int(1)),
                MapEntry::new(Value::string("a"), Value::Int(2)),
            ],
        ),
    )?;
    go.map_put(body, &Value::id("m"), &Value::string("k"), &Value::Int(3))?;
    go.map_delete(body, &Value::id("m"), &Value::string("z"))?;

    let text = go.render()?;
    assert!(text.contains(
        "func (c *Counter) Edit(i int) {\n\
         \tc.tags = append(c.tags, \"a\")\n\
         \tc.tags = append(c.tags, []string{\"b\", \"c\"}...)\n\
         \tc.tags = append(c.tags[:(i - 1)], c.tags[(i - 1)+1:]...)\n\
         \tm := map[string]int{\"z\": 1, \"a\": 2}\n\
         \tm[\"k\"] = 3\n\
         \tdelete(m, \"z\")\n\
         }\n"
    ));
    Ok(())
}

#[test]
fn test_for_each_binding_forms() -> Result<()> {
    let mut go = GoBackend::new("counter");
    counter(&mut go)?;
    let body = go.method("Counter", "Loops", &[])?;
    let tags = Value::own_field("tags");
    go.for_each(body, &tags, "", "")?;
    go.for_each(body, &tags, "i", "")?;
    go.for_each(body, &tags, "", "t")?;
    let inner = go.for_each(body, &tags, "i", "t")?;
    go.if_then(inner, &Value::combined(Value::id("t"), Operator::Eq, Value::string("x")))?;

    let text = go.render()?;
    assert!(text.contains("\tfor range c.tags {\n"));
    assert!(text.contains("\tfor i := range c.tags {\n"));
    assert!(text.contains("\tfor _, t := range c.tags {\n"));
    assert!(text.contains("\tfor i, t := range c.tags {\n\t\tif t == \"x\" {\n\t\t}\n\t}\n"));
    Ok(())
}

#[test]
fn test_imports_are_collected() -> Result<()> {
    let mut go = GoBackend::new("counter");
    counter(&mut go)?;
    let body = go.return_method("Counter", "Label", &TypeDesc::STRING, &[])?;
    go.return_value(body, &Value::int_to_string(Value::own_field("count")))?;
    let text = go.render()?;
    assert!(text.starts_with("package counter\n\nimport \"strconv\"\n\ntype Counter struct {\n"));
    assert!(text.contains("\treturn strconv.FormatInt(int64(c.count), 10)\n"));

    let other = go.return_method("Counter", "Limit", &TypeDesc::FLOAT64, &[])?;
    go.return_value(other, &Value::float(f64::INFINITY))?;
    let text = go.render()?;
    assert!(text.starts_with("package counter\n\nimport (\n\t\"math\"\n\t\"strconv\"\n)\n"));
    assert!(text.contains("\treturn math.Inf(1)\n"));
    Ok(())
}

#[test]
fn test_if_else() -> Result<()> {
    let mut go = GoBackend::new("counter");
    counter(&mut go)?;
    let body = go.return_method("Counter", "Sign", &TypeDesc::INT, &[])?;
    let (then, otherwise) = go.if_else(
        body,
        &Value::combined(Value::own_field("count"), Operator::Lt, Value::Int(0)),
    )?;
    go.return_value(then, &Value::Int(-1))?;
    go.return_value(otherwise, &Value::Int(1))?;
    let text = go.render()?;
    assert!(text.contains(
        "\tif c.count < 0 {\n\
         \t\treturn -1\n\
         \t} else {\n\
         \t\treturn 1\n\
         \t}\n"
    ));
    Ok(())
}

#[test]
fn test_requires_package() {
    let err = GoBackend::from_args(&BackendArgs::new()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1003);
    assert_eq!(err.to_string(), "go: missing required argument `package`");

    let go = GoBackend::from_args(&BackendArgs::new().with("package", "models")).unwrap();
    assert_eq!(go.package(), "models");
}

#[test]
fn test_pointer_type_is_unsupported() {
    let mut go = GoBackend::new("nodes");
    let err = go
        .model("Node", &[Field::new("next", TypeDesc::pointer(TypeDesc::model("Node")))])
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn test_receiver_field_needs_method() {
    let mut imports = Imports::new();
    let err = resolve_value(&Value::own_field("x"), None, &mut imports).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
    assert_eq!(receiver_name("Counter"), "c");
    assert_eq!(receiver_name("Élan"), "é");
}

#[test]
fn test_parameter_named_like_receiver() -> Result<()> {
    let mut go = GoBackend::new("counter");
    counter(&mut go)?;
    let err = go
        .method("Counter", "Set", &[Field::new("c", TypeDesc::INT64)])
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
    assert_eq!(err.to_string(), "go: unsupported binding `c` shadowing the method receiver");

    // Nothing of the rejected method reaches the file.
    let text = go.render()?;
    assert!(!text.contains("Set"));
    Ok(())
}

#[test]
fn test_locals_named_like_receiver() -> Result<()> {
    let mut go = GoBackend::new("items");
    go.model("Item", &[Field::new("names", TypeDesc::array(TypeDesc::STRING))])?;
    let body = go.method("Item", "Walk", &[])?;
    let names = Value::own_field("names");

    let err = go.for_each(body, &names, "i", "").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
    let err = go.for_each(body, &names, "", "i").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
    let err = go.declare(body, "i", &Value::Int(0)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);

    go.for_each(body, &names, "n", "name")?;
    let text = go.render()?;
    assert!(text.contains(
        "func (i *Item) Walk() {\n\
         \tfor n, name := range i.names {\n\
         \t}\n\
         }\n"
    ));
    Ok(())
}

#[test]
fn test_integral_float_keeps_float_type() -> Result<()> {
    let mut go = GoBackend::new("counter");
    counter(&mut go)?;
    let body = go.method("Counter", "Scale", &[])?;
    go.declare(body, "x", &Value::float(3.0))?;
    go.assign(
        body,
        &Value::id("x"),
        &Value::combined(Value::id("x"), Operator::Mul, Value::float(0.5)),
    )?;
    go.assign(body, &Value::id("x"), &Value::float(-2.0))?;

    let text = go.render()?;
    assert!(text.contains(
        "func (c *Counter) Scale() {\n\
         \tx := 3.0\n\
         \tx = x * 0.5\n\
         \tx = -2.0\n\
         }\n"
    ));
    Ok(())
}
