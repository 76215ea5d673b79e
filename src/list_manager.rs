use crate::models::{next_id, ListError, Todo, TodoList};
use tracing::info;

const NAME_LENGTH: std::ops::RangeInclusive<usize> = 1..=100;

/// Returns the message for an invalid list name, or `None` when it is valid.
///
/// `renaming` is the id of the list being renamed; its own current name does
/// not count as a duplicate.
pub fn error_for_list_name(
    lists: &[TodoList],
    name: &str,
    renaming: Option<u64>,
) -> Option<&'static str> {
    if !NAME_LENGTH.contains(&name.chars().count()) {
        Some("List name must be between 1 and 100 characters.")
    } else if lists
        .iter()
        .any(|list| list.name == name && Some(list.id) != renaming)
    {
        Some("List name must be unique.")
    } else {
        None
    }
}

/// Returns the message for invalid todo text, or `None` when it is valid.
pub fn error_for_todo(name: &str) -> Option<&'static str> {
    if !NAME_LENGTH.contains(&name.chars().count()) {
        Some("To-do must be between 1 and 100 characters.")
    } else {
        None
    }
}

pub fn find_list(lists: &[TodoList], list_id: u64) -> Result<&TodoList, ListError> {
    lists
        .iter()
        .find(|list| list.id == list_id)
        .ok_or(ListError::ListNotFound(list_id))
}

pub struct ListManager<'a> {
    lists: &'a mut Vec<TodoList>,
}

impl<'a> ListManager<'a> {
    pub fn new(lists: &'a mut Vec<TodoList>) -> Self {
        Self { lists }
    }

    pub fn create_list(&mut self, name: &str) -> Result<u64, ListError> {
        let name = name.trim();
        if let Some(message) = error_for_list_name(&self.lists, name, None) {
            return Err(ListError::Validation(message));
        }

        let id = next_id(self.lists.iter().map(|list| list.id));
        self.lists.push(TodoList::new(id, name.to_string()));
        info!(list_id = id, "list created");
        Ok(id)
    }

    pub fn rename_list(&mut self, list_id: u64, name: &str) -> Result<(), ListError> {
        let name = name.trim();
        find_list(&self.lists, list_id)?;
        if let Some(message) = error_for_list_name(&self.lists, name, Some(list_id)) {
            return Err(ListError::Validation(message));
        }

        let list = self.list_mut(list_id)?;
        list.name = name.to_string();
        info!(list_id, "list renamed");
        Ok(())
    }

    pub fn delete_list(&mut self, list_id: u64) -> Result<TodoList, ListError> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id == list_id)
            .ok_or(ListError::ListNotFound(list_id))?;

        let removed = self.lists.remove(index);
        info!(list_id, todos = removed.todos.len(), "list deleted");
        Ok(removed)
    }

    pub fn add_todo(&mut self, list_id: u64, text: &str) -> Result<u64, ListError> {
        let list = self.list_mut(list_id)?;
        let text = text.trim();
        if let Some(message) = error_for_todo(text) {
            return Err(ListError::Validation(message));
        }

        let id = list.next_todo_id();
        list.todos.push(Todo::new(id, text.to_string()));
        info!(list_id, todo_id = id, "todo added");
        Ok(id)
    }

    /// Removing a todo that is already gone is not an error.
    pub fn delete_todo(&mut self, list_id: u64, todo_id: u64) -> Result<(), ListError> {
        let list = self.list_mut(list_id)?;
        let before = list.todos.len();
        list.todos.retain(|todo| todo.id != todo_id);
        if list.todos.len() != before {
            info!(list_id, todo_id, "todo deleted");
        }
        Ok(())
    }

    pub fn set_todo_completed(
        &mut self,
        list_id: u64,
        todo_id: u64,
        completed: bool,
    ) -> Result<(), ListError> {
        let list = self.list_mut(list_id)?;
        let todo = list
            .todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
            .ok_or(ListError::TodoNotFound { list_id, todo_id })?;

        todo.completed = completed;
        info!(list_id, todo_id, completed, "todo updated");
        Ok(())
    }

    pub fn complete_all(&mut self, list_id: u64) -> Result<(), ListError> {
        let list = self.list_mut(list_id)?;
        for todo in list.todos.iter_mut() {
            todo.completed = true;
        }
        info!(list_id, "all todos completed");
        Ok(())
    }

    fn list_mut(&mut self, list_id: u64) -> Result<&mut TodoList, ListError> {
        self.lists
            .iter_mut()
            .find(|list| list.id == list_id)
            .ok_or(ListError::ListNotFound(list_id))
    }
}
