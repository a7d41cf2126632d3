//! Server-rendered HTML pages.
//!
//! Pages are small enough to be assembled with `format!`; every value that
//! comes from a record or a request is escaped first.

use crate::{
    models::{CatRepoModel, DogRepoModel},
    utils::escape_html,
};

const NAV: &str = "<nav>\
<a href=\"/\">Home</a> | \
<a href=\"/page1\">Cats</a> | \
<a href=\"/page2\">Add a cat</a> | \
<a href=\"/page3\">Search</a> | \
<a href=\"/page4\">Dogs</a>\
</nav>";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>{}</title></head><body>{}{}</body></html>",
        escape_html(title),
        NAV,
        body
    )
}

pub fn index_page(title: &str, page_name: &str, current_name: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\
<p>The last cat added was <strong id=\"currentName\">{}</strong>.</p>\
<form action=\"/cat/last\" method=\"post\"><button type=\"submit\">Give them another bed</button></form>",
        escape_html(page_name),
        escape_html(current_name)
    );
    layout(title, &body)
}

pub fn cats_page(cats: &[CatRepoModel]) -> String {
    let mut rows = String::new();
    for cat in cats {
        rows.push_str(&format!(
            "<li><strong>{}</strong> owns {} bed(s), added {}</li>",
            escape_html(&cat.name),
            cat.beds_owned,
            cat.created_date.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    if rows.is_empty() {
        rows.push_str("<li>No cats yet.</li>");
    }

    layout("Cats", &format!("<h1>Cats</h1><ul id=\"cats\">{}</ul>", rows))
}

pub fn create_cat_page() -> String {
    layout(
        "Add a cat",
        "<h1>Add a cat</h1>\
<form id=\"catForm\" action=\"/cat\" method=\"post\">\
<label for=\"firstname\">First name</label><input id=\"firstname\" name=\"firstname\" type=\"text\">\
<label for=\"lastname\">Last name</label><input id=\"lastname\" name=\"lastname\" type=\"text\">\
<label for=\"beds\">Beds</label><input id=\"beds\" name=\"beds\" type=\"number\" min=\"0\">\
<button type=\"submit\">Add cat</button>\
</form>",
    )
}

pub fn search_page() -> String {
    layout(
        "Search",
        "<h1>Search</h1>\
<form id=\"catSearch\" action=\"/cat/search\" method=\"get\">\
<label for=\"catName\">Cat name</label><input id=\"catName\" name=\"name\" type=\"text\">\
<button type=\"submit\">Find cat</button>\
</form>\
<form id=\"dogSearch\" action=\"/dog/search\" method=\"get\">\
<label for=\"dogName\">Dog name</label><input id=\"dogName\" name=\"name\" type=\"text\">\
<button type=\"submit\">Find dog</button>\
</form>",
    )
}

pub fn dogs_page(dogs: &[DogRepoModel]) -> String {
    let mut rows = String::new();
    for dog in dogs {
        rows.push_str(&format!(
            "<li><strong>{}</strong>, {} aged {}</li>",
            escape_html(&dog.name),
            escape_html(&dog.breed),
            dog.age
        ));
    }
    if rows.is_empty() {
        rows.push_str("<li>No dogs yet.</li>");
    }

    let body = format!(
        "<h1>Dogs</h1><ul id=\"dogs\">{}</ul>\
<h2>Add a dog</h2>\
<form id=\"dogForm\" action=\"/dog\" method=\"post\">\
<label for=\"name\">Name</label><input id=\"name\" name=\"name\" type=\"text\">\
<label for=\"breed\">Breed</label><input id=\"breed\" name=\"breed\" type=\"text\">\
<label for=\"age\">Age</label><input id=\"age\" name=\"age\" type=\"number\" min=\"0\">\
<button type=\"submit\">Add dog</button>\
</form>\
<form action=\"/dog/last\" method=\"post\"><button type=\"submit\">Age the last dog</button></form>",
        rows
    );
    layout("Dogs", &body)
}

pub fn not_found_page(page: &str) -> String {
    layout(
        "Page not found",
        &format!(
            "<h1>404</h1><p>The page <code>{}</code> does not exist.</p>",
            escape_html(page)
        ),
    )
}
