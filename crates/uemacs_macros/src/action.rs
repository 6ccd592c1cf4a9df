use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Ident};

pub fn action(input: TokenStream) -> TokenStream {
    let input = match syn::parse::<DeriveInput>(input) {
        Ok(input) => input,
        Err(error) => return error.to_compile_error().into(),
    };

    let Data::Enum(enum_data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "`Action` can only be used on enums")
            .to_compile_error()
            .into();
    };

    let name = &input.ident;
    let names = subcommand_names(enum_data);
    let constants = subcommand_constants(name, enum_data);

    TokenStream::from(quote! {
        impl #name {
            /// The name of the subcommand on the command line.
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#names)*
                }
            }
        }

        #(#constants)*
    })
}

fn subcommand_names(enum_data: &DataEnum) -> impl Iterator<Item = TokenStream2> + '_ {
    enum_data.variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let lowercase = proc_macro2::Literal::string(&variant_name.to_string().to_lowercase());
        quote! {
            Self::#variant_name => #lowercase,
        }
    })
}

fn subcommand_constants<'a>(
    name: &'a Ident,
    enum_data: &'a DataEnum,
) -> impl Iterator<Item = TokenStream2> + 'a {
    enum_data.variants.iter().map(move |variant| {
        let variant_name = &variant.ident;
        let uppercase = Ident::new(
            &variant_name.to_string().to_uppercase(),
            proc_macro2::Span::call_site(),
        );
        quote! {
            #[allow(missing_docs)]
            pub const #uppercase: &str = #name::#variant_name.name();
        }
    })
}
