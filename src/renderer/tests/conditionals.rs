use crate::context::Context;
use crate::engine::Engine;

fn render(content: &str, context: &Context) -> String {
    let engine = Engine::default();
    engine.render_str(content, context).unwrap()
}

#[test]
fn render_if_with_boolean() {
    let mut context = Context::new();
    context.insert("flag", &true);
    assert_eq!(render("@if($flag == true)Yes@endif", &context), "Yes");
    context.insert("flag", &false);
    assert_eq!(render("@if($flag == true)Yes@endif", &context), "");
}

#[test]
fn render_if_else() {
    let mut context = Context::new();
    context.insert("user", "ann");
    let tpl = "<p>@if($user)Hello {{ user }}@else<em>Sign in</em>@endif</p>";
    assert_eq!(render(tpl, &context), "<p>Hello ann</p>");
    assert_eq!(render(tpl, &Context::new()), "<p><em>Sign in</em></p>");
}

#[test]
fn email_in_if_body_is_kept() {
    let mut context = Context::new();
    context.insert("show", &true);
    assert_eq!(
        render("@if($show)Mail admin@elsewhere.org@endif", &context),
        "Mail admin@elsewhere.org"
    );
}

#[test]
fn render_nested_ifs() {
    let mut context = Context::new();
    context.insert("logged", &true);
    context.insert("role", "editor");
    let tpl = "@if($logged)[@if($role == 'admin')admin@else@if($role == 'editor')editor@endif@endif]@endif";
    assert_eq!(render(tpl, &context), "[editor]");
}

#[test]
fn render_if_with_numbers() {
    let mut context = Context::new();
    context.insert("count", &10);
    let inputs = vec![
        ("@if($count > 5)A@endif", "A"),
        ("@if($count >= 10 && $count < 11)B@endif", "B"),
        ("@if($count == '10')C@endif", "C"),
        ("@if($count === '10')D@endif", ""),
        ("@if(!($count < 5))E@endif", "E"),
    ];

    for (input, expected) in inputs {
        println!("{:?} -> {:?}", input, expected);
        assert_eq!(render(input, &context), expected);
    }
}

#[test]
fn conditions_cannot_run_code() {
    let context = Context::new();
    assert_eq!(render("@if(system('id'))pwned@endif", &context), "");
    assert_eq!(render("@if(`id`)pwned@endif", &context), "");
}

#[test]
fn conditions_see_loop_output() {
    let mut context = Context::new();
    context.insert("items", &vec!["a"]);
    let tpl = "@foreach items as item@if('{{ item.value }}' == 'a')found@endif@endforeach";
    assert_eq!(render(tpl, &context), "found");
}
