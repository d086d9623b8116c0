#[derive(Debug, PartialEq, Eq)]
pub struct Author {
    pub id: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Book {
    pub id: &'static str,
    pub name: &'static str,
    pub page_count: &'static str,
    pub author_id: &'static str,
}

pub static ALL_AUTHORS: &[Author] = &[
    Author {
        id: "author-1",
        first_name: "Joanne",
        last_name: "Rowling",
    },
    Author {
        id: "author-2",
        first_name: "Herman",
        last_name: "Melville",
    },
    Author {
        id: "author-3",
        first_name: "Anne",
        last_name: "Rice",
    },
];

pub static ALL_BOOKS: &[Book] = &[
    Book {
        id: "book-1",
        name: "Harry Potter and the Philosopher's Stone",
        page_count: "223",
        author_id: "author-1",
    },
    Book {
        id: "book-2",
        name: "Moby Dick",
        page_count: "635",
        author_id: "author-2",
    },
    Book {
        id: "book-3",
        name: "Interview with the vampire",
        page_count: "371",
        author_id: "author-3",
    },
];

pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Book {
    fn id(&self) -> &str {
        self.id
    }
}

impl Identified for Author {
    fn id(&self) -> &str {
        self.id
    }
}

/// Returns the first record with the given id, in slice order.
pub fn find_by_id<'a, T: Identified>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|record| record.id() == id)
}

pub fn find_book_by_id(id: &str) -> Option<&'static Book> {
    find_by_id(ALL_BOOKS, id)
}

pub fn find_author_by_id(id: &str) -> Option<&'static Author> {
    find_by_id(ALL_AUTHORS, id)
}

/// A resolved dataset entry, handed down to child fields as their source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Record {
    Book(&'static Book),
    Author(&'static Author),
}

impl Record {
    /// Looks up a field by its GraphQL name.
    pub fn field(&self, name: &str) -> Option<&'static str> {
        match self {
            Record::Book(book) => match name {
                "id" => Some(book.id),
                "name" => Some(book.name),
                "pageCount" => Some(book.page_count),
                "authorId" => Some(book.author_id),
                _ => None,
            },
            Record::Author(author) => match name {
                "id" => Some(author.id),
                "firstName" => Some(author.first_name),
                "lastName" => Some(author.last_name),
                _ => None,
            },
        }
    }
}
