//! HTML pages. Every piece of user text goes through [`escape`].

use crate::models::{by_completion, Completion, TodoList};
use crate::session::Flash;
use std::fmt::Write;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(flash: &Flash, content: &str) -> String {
    let mut messages = String::new();
    if let Some(error) = &flash.error {
        let _ = write!(messages, r#"<div class="flash error"><p>{}</p></div>"#, escape(error));
    }
    if let Some(success) = &flash.success {
        let _ = write!(messages, r#"<div class="flash success"><p>{}</p></div>"#, escape(success));
    }

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Todos</title>
    <script src="/javascripts/application.js" defer></script>
  </head>
  <body>
    <header><h1><a href="/lists">Todos</a></h1></header>
    <main>
      {messages}
      {content}
    </main>
  </body>
</html>
"#
    )
}

fn list_class(list: &TodoList) -> &'static str {
    if list.is_complete() {
        "complete"
    } else {
        ""
    }
}

pub fn lists_page(flash: &Flash, lists: &[TodoList]) -> String {
    let mut items = String::new();
    for list in by_completion(lists) {
        let _ = write!(
            items,
            r#"<li class="{class}"><a href="/lists/{id}"><h2>{name}</h2><p>{remaining} / {total}</p></a></li>"#,
            class = list_class(list),
            id = list.id,
            name = escape(&list.name),
            remaining = list.todos_remaining_count(),
            total = list.todos_count(),
        );
    }

    let content = format!(
        r#"<section id="lists">
        <ul>{items}</ul>
        <a class="add" href="/lists/new">New List</a>
      </section>"#
    );
    layout(flash, &content)
}

pub fn new_list_page(flash: &Flash, list_name: &str) -> String {
    let content = format!(
        r#"<form action="/lists" method="post">
        <dl>
          <dt><label for="list_name">Enter the name for your new list:</label></dt>
          <dd><input id="list_name" name="list_name" placeholder="List Name" type="text" value="{value}"></dd>
        </dl>
        <fieldset class="actions">
          <input type="submit" value="Save">
          <a href="/lists">Cancel</a>
        </fieldset>
      </form>"#,
        value = escape(list_name),
    );
    layout(flash, &content)
}

pub fn edit_list_page(flash: &Flash, list: &TodoList, list_name: &str) -> String {
    let content = format!(
        r#"<form action="/lists/{id}" method="post">
        <h2>Editing '{name}'</h2>
        <dl>
          <dt><label for="list_name">Enter the new name for the list:</label></dt>
          <dd><input id="list_name" name="list_name" placeholder="List Name" type="text" value="{value}"></dd>
        </dl>
        <fieldset class="actions">
          <input type="submit" value="Save">
          <a href="/lists/{id}">Cancel</a>
        </fieldset>
      </form>
      <form action="/lists/{id}/destroy" method="post" class="delete">
        <button type="submit">Delete List</button>
      </form>"#,
        id = list.id,
        name = escape(&list.name),
        value = escape(list_name),
    );
    layout(flash, &content)
}

pub fn list_page(flash: &Flash, list: &TodoList, todo_draft: &str) -> String {
    let mut todos = String::new();
    for todo in by_completion(&list.todos) {
        let (class, toggle_to) = if todo.completed {
            ("complete", "false")
        } else {
            ("", "true")
        };
        let _ = write!(
            todos,
            r#"<li class="{class}">
          <form action="/lists/{list_id}/todos/{todo_id}" method="post" class="check">
            <input type="hidden" name="completed" value="{toggle_to}">
            <button type="submit">Complete</button>
          </form>
          <h3>{name}</h3>
          <form action="/lists/{list_id}/todos/{todo_id}/destroy" method="post" class="delete">
            <button type="submit">Delete</button>
          </form>
        </li>"#,
            list_id = list.id,
            todo_id = todo.id,
            name = escape(&todo.name),
        );
    }

    let content = format!(
        r#"<section id="todos" class="{class}">
        <header>
          <h2>{name}</h2>
          <ul>
            <li>
              <form action="/lists/{id}/complete_all" method="post">
                <button class="check" type="submit">Complete All</button>
              </form>
            </li>
            <li><a class="edit" href="/lists/{id}/edit">Edit List</a></li>
          </ul>
        </header>
        <ul>{todos}</ul>
      </section>
      <form action="/lists/{id}/todos" method="post">
        <dl>
          <dt><label for="todo">Enter a new todo item:</label></dt>
          <dd><input id="todo" name="todo" placeholder="Something to do" type="text" value="{draft}"></dd>
        </dl>
        <fieldset class="actions">
          <input type="submit" value="Add">
        </fieldset>
      </form>"#,
        class = list_class(list),
        id = list.id,
        name = escape(&list.name),
        draft = escape(todo_draft),
    );
    layout(flash, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Todo;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_lists_page_orders_and_escapes() {
        let mut done = TodoList::new(1, "Done <list>".to_string());
        done.todos.push(Todo {
            id: 1,
            name: "x".to_string(),
            completed: true,
        });
        let open = TodoList::new(2, "Open".to_string());

        let html = lists_page(&Flash::default(), &[done, open]);
        let open_at = html.find("/lists/2").unwrap();
        let done_at = html.find("/lists/1").unwrap();
        assert!(open_at < done_at);
        assert!(html.contains("Done &lt;list&gt;"));
        assert!(html.contains("<p>0 / 1</p>"));
        assert!(html.contains(r#"class="complete""#));
    }

    #[test]
    fn test_layout_shows_flash() {
        let flash = Flash {
            error: Some("List name must be unique.".to_string()),
            success: None,
        };
        let html = new_list_page(&flash, "Groceries");
        assert!(html.contains(
            r#"<div class="flash error"><p>List name must be unique.</p></div>"#
        ));
        assert!(html.contains(r#"value="Groceries""#));
        assert!(!html.contains("flash success"));
    }

    #[test]
    fn test_list_page_toggle_values() {
        let mut list = TodoList::new(3, "Chores".to_string());
        list.todos.push(Todo {
            id: 1,
            name: "Dishes".to_string(),
            completed: true,
        });
        list.todos.push(Todo::new(2, "Laundry".to_string()));

        let html = list_page(&Flash::default(), &list, "");
        assert!(html.contains(r#"action="/lists/3/todos/2""#));
        let laundry = html.find("Laundry").unwrap();
        let dishes = html.find("Dishes").unwrap();
        assert!(laundry < dishes);
        assert!(html.contains(r#"name="completed" value="false""#));
        assert!(html.contains(r#"name="completed" value="true""#));
    }
}
