mod patent_edit;
mod patent_list;

pub use patent_edit::PatentEditPage;
pub use patent_list::PatentListPage;
