mod layout;
pub use layout::{NotFound, PublicLayout};

mod public;
pub use public::{
    Home, JournalList, JournalPage, PublicationList, PublicationPage, SeminarList, SeminarPage,
    ServiceList, ServicePage, Whistleblower,
};

mod login;
pub use login::Login;

mod admin;
pub use admin::{
    AdminDashboard, AdminLayout, AdminNewspaperEdit, AdminNewspaperNew, AdminNewspapers,
    AdminPublicationEdit, AdminPublicationNew, AdminPublications, AdminReports, AdminSeminarEdit,
    AdminSeminarNew, AdminSeminars, AdminServiceEdit, AdminServiceNew, AdminServices,
};
