use crate::interest_flags;

interest_flags! {
    /// Streaming services a user can flag as subscribed
    ///
    /// The key doubles as the subject key of the service's popularity row.
    pub enum StreamingService {
        Netflix => ("netflix", "Netflix", "Netflix"),
        AmazonPrime => ("amazon_prime", "Amazon Prime", "Amazon Prime"),
        DisneyPlus => ("disney_plus", "Disney+", "Disney+"),
        ParamountPlus => ("paramount_plus", "Paramount+", "Paramount+"),
        Max => ("max", "Max", "Max"),
        Hulu => ("hulu", "Hulu", "Hulu"),
        AppleTvPlus => ("apple_tv_plus", "Apple TV+", "Apple TV+"),
        Peacock => ("peacock", "Peacock", "Peacock"),
    }
}
