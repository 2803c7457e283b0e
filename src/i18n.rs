//! User-facing strings, selected by the configured locale.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    El,
    En,
}

impl Locale {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en_us" | "en_gb" | "english" => Locale::En,
            _ => Locale::El,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::El => "el",
            Locale::En => "en",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    // flash messages
    RegisterSuccess,
    EmailTaken,
    LoginSuccess,
    InvalidCredentials,
    LoggedOut,
    LoginRequiredForService,
    LoginRequired,
    ServiceAdded,
    InvalidPrice,
    MissingFields,
    BookingCreated,
    ServiceNotFound,

    // page labels
    SiteTitle,
    Home,
    Register,
    Login,
    Logout,
    AddService,
    MyBookings,
    Welcome,
    Services,
    NoServices,
    OfferedBy,
    Book,
    FullName,
    Email,
    Password,
    ServiceName,
    Description,
    Price,
    Submit,
    BookService,
    YourEmail,
    NoBookings,
    Service,
    Customer,
    Date,
    Status,
    New,
    Seen,
    NewBookings,
}

impl Text {
    pub fn get(self, locale: Locale) -> &'static str {
        match locale {
            Locale::El => self.el(),
            Locale::En => self.en(),
        }
    }

    fn el(self) -> &'static str {
        match self {
            Text::RegisterSuccess => "Εγγραφή επιτυχής! Μπορείτε τώρα να συνδεθείτε.",
            Text::EmailTaken => "Το email υπάρχει ήδη.",
            Text::LoginSuccess => "Επιτυχής σύνδεση!",
            Text::InvalidCredentials => "Λάθος email ή κωδικός.",
            Text::LoggedOut => "Αποσυνδεθήκατε.",
            Text::LoginRequiredForService => "Πρέπει να συνδεθείτε για να προσθέσετε υπηρεσία.",
            Text::LoginRequired => "Πρέπει να συνδεθείτε.",
            Text::ServiceAdded => "Υπηρεσία προστέθηκε!",
            Text::InvalidPrice => "Η τιμή πρέπει να είναι μη αρνητικός αριθμός.",
            Text::MissingFields => "Συμπληρώστε όλα τα πεδία.",
            Text::BookingCreated => "Η κράτησή σας καταχωρήθηκε!",
            Text::ServiceNotFound => "Η υπηρεσία δεν βρέθηκε.",

            Text::SiteTitle => "Υπηρεσίες",
            Text::Home => "Αρχική",
            Text::Register => "Εγγραφή",
            Text::Login => "Σύνδεση",
            Text::Logout => "Αποσύνδεση",
            Text::AddService => "Νέα υπηρεσία",
            Text::MyBookings => "Οι κρατήσεις μου",
            Text::Welcome => "Καλώς ήρθατε",
            Text::Services => "Διαθέσιμες υπηρεσίες",
            Text::NoServices => "Δεν υπάρχουν ακόμη υπηρεσίες.",
            Text::OfferedBy => "Από",
            Text::Book => "Κράτηση",
            Text::FullName => "Ονοματεπώνυμο",
            Text::Email => "Email",
            Text::Password => "Κωδικός",
            Text::ServiceName => "Όνομα υπηρεσίας",
            Text::Description => "Περιγραφή",
            Text::Price => "Τιμή",
            Text::Submit => "Υποβολή",
            Text::BookService => "Κράτηση υπηρεσίας",
            Text::YourEmail => "Το email σας",
            Text::NoBookings => "Δεν υπάρχουν κρατήσεις.",
            Text::Service => "Υπηρεσία",
            Text::Customer => "Πελάτης",
            Text::Date => "Ημερομηνία",
            Text::Status => "Κατάσταση",
            Text::New => "Νέα",
            Text::Seen => "Προβλήθηκε",
            Text::NewBookings => "Νέες κρατήσεις",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Text::RegisterSuccess => "Registration successful! You can now log in.",
            Text::EmailTaken => "That email is already registered.",
            Text::LoginSuccess => "Logged in successfully!",
            Text::InvalidCredentials => "Wrong email or password.",
            Text::LoggedOut => "You have been logged out.",
            Text::LoginRequiredForService => "You must log in to add a service.",
            Text::LoginRequired => "You must log in.",
            Text::ServiceAdded => "Service added!",
            Text::InvalidPrice => "Price must be a non-negative number.",
            Text::MissingFields => "Please fill in all fields.",
            Text::BookingCreated => "Your booking has been recorded!",
            Text::ServiceNotFound => "Service not found.",

            Text::SiteTitle => "Services",
            Text::Home => "Home",
            Text::Register => "Register",
            Text::Login => "Log in",
            Text::Logout => "Log out",
            Text::AddService => "Add service",
            Text::MyBookings => "My bookings",
            Text::Welcome => "Welcome",
            Text::Services => "Available services",
            Text::NoServices => "No services yet.",
            Text::OfferedBy => "By",
            Text::Book => "Book",
            Text::FullName => "Full name",
            Text::Email => "Email",
            Text::Password => "Password",
            Text::ServiceName => "Service name",
            Text::Description => "Description",
            Text::Price => "Price",
            Text::Submit => "Submit",
            Text::BookService => "Book a service",
            Text::YourEmail => "Your email",
            Text::NoBookings => "No bookings yet.",
            Text::Service => "Service",
            Text::Customer => "Customer",
            Text::Date => "Date",
            Text::Status => "Status",
            Text::New => "New",
            Text::Seen => "Seen",
            Text::NewBookings => "New bookings",
        }
    }
}
