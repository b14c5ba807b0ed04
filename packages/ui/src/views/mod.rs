mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod entity;
pub use entity::{use_entity, Loaded};

mod catalog;
pub use catalog::PublicCatalog;

mod detail;
pub use detail::{
    display_date, display_datetime, NewspaperDetail, PublicationDetail, SeminarDetail,
    ServiceDetail,
};

mod forms;
pub use forms::{NewspaperForm, PublicationForm, SeminarForm, ServiceForm};

mod reports;
pub use reports::ReportsTriage;

mod dashboard;
pub use dashboard::Dashboard;

mod login;
pub use login::LoginForm;

mod whistleblower;
pub use whistleblower::WhistleblowerForm;
